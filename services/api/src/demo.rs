use crate::infra::InMemorySnapshotRepository;
use agency_pulse::config::{AnalyticsConfig, AppConfig};
use agency_pulse::error::AppError;
use agency_pulse::performance::{
    MetricScale, MonthKey, PerformanceService, Report, ReportAssembler, Role, RoleProfile,
    SnapshotImporter, SnapshotSubmission, UserId,
};
use chrono::Local;
use clap::Args;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Limit the demo to a single role (employee, intern, freelancer, hr, manager, operations)
    #[arg(long)]
    pub(crate) role: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// KPI CSV export with user_id, role and month columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// User whose history should be reported
    #[arg(long)]
    pub(crate) user_id: String,
    /// Role the history was recorded under (defaults to employee)
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        csv,
        user_id,
        role,
        json,
    } = args;

    let config = AppConfig::load()?;
    let role = Role::parse(role.as_deref().unwrap_or_default());
    let user_id = UserId(user_id);

    let imported = SnapshotImporter::from_path(&csv)?;
    let history = SnapshotImporter::history_for(&imported, &user_id, role);
    let report = ReportAssembler::new(&config.analytics).build_for_role(&history, role)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", format_report(&report));
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let roles: Vec<Role> = match args.role.as_deref() {
        Some(raw) => vec![Role::parse(raw)],
        None => Role::ordered().to_vec(),
    };

    let repository = Arc::new(InMemorySnapshotRepository::default());
    let service = PerformanceService::new(repository, &AnalyticsConfig::default());

    println!(
        "Agency performance demo ({})",
        Local::now().date_naive().format("%Y-%m-%d")
    );

    for role in roles {
        let user_id = UserId(format!("demo-{}", role.label().to_ascii_lowercase()));
        for submission in seeded_history(role) {
            service.record(user_id.clone(), role, submission)?;
        }
        let report = service.report(&user_id, role)?;
        println!();
        print!("{}", format_report(&report));
    }

    Ok(())
}

const DEMO_MONTHS: [(i32, u32); 4] = [(2024, 1), (2024, 2), (2024, 3), (2024, 4)];

/// Four months of synthetic KPIs per role. Even-indexed metrics climb,
/// odd-indexed ones drift down so every report carries mixed signals.
fn seeded_history(role: Role) -> Vec<SnapshotSubmission> {
    let profile = RoleProfile::for_role(role);

    DEMO_MONTHS
        .iter()
        .enumerate()
        .filter_map(|(step, &(year, month))| {
            let month = MonthKey::new(year, month).ok()?;
            let kpi_data: Map<String, Value> = profile
                .metrics()
                .iter()
                .enumerate()
                .map(|(index, metric)| {
                    let value = seeded_value(metric.scale, index, step);
                    (metric.name.to_string(), Value::from(value))
                })
                .collect();
            Some(SnapshotSubmission {
                month,
                kpi_data,
                created_at: None,
            })
        })
        .collect()
}

fn seeded_value(scale: MetricScale, index: usize, step: usize) -> f64 {
    let base = 68.0 + (index as f64 * 4.0);
    let drift = if index % 2 == 0 { 4.0 } else { -3.0 };
    let percent = (base + drift * step as f64).clamp(0.0, 100.0);
    match scale {
        MetricScale::Percent => percent,
        MetricScale::Rating => percent.round() / 10.0,
    }
}

pub(crate) fn format_report(report: &Report) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "{} performance report for {}\n",
        report.role.label(),
        report.user_id
    ));
    out.push_str(&format!(
        "- Current score {:.1} (previous {:.1}, best {:.1}, average {:.1})\n",
        summary.current_score, summary.previous_score, summary.best_score, summary.average_score
    ));
    out.push_str(&format!(
        "- Improvement {:+.1} ({}%) | consistency {:.0} | trend {} | {} months\n",
        summary.improvement,
        summary.improvement_percent,
        summary.consistency_score,
        summary
            .score_trend
            .map(|direction| direction.label())
            .unwrap_or("n/a"),
        summary.total_data_points
    ));

    if !report.trends.is_empty() {
        out.push_str("Metric trends:\n");
        for (metric, trend) in &report.trends {
            out.push_str(&format!(
                "  - {}: {} ({:.1} -> {:.1}, slope {:+.2})\n",
                metric,
                trend.direction.label(),
                trend.previous,
                trend.current,
                trend.slope
            ));
        }
    }

    if !report.goal_tracking.is_empty() {
        out.push_str("Goals:\n");
        for (metric, goal) in &report.goal_tracking {
            let marker = if goal.achieved { "met" } else { "open" };
            out.push_str(&format!(
                "  - {}: {:.1} / {:.1} ({}%, {})\n",
                metric, goal.current, goal.target, goal.percent, marker
            ));
        }
    }

    out.push_str("Insights:\n");
    for insight in &report.insights {
        out.push_str(&format!(
            "  - [{}] {}\n",
            insight.severity.label(),
            insight.message
        ));
    }

    if !report.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for recommendation in &report.recommendations {
            out.push_str(&format!("  - {}\n", recommendation));
        }
    }

    out.push_str("Monthly breakdown:\n");
    for entry in &report.monthly_breakdown {
        if entry.has_submission {
            out.push_str(&format!("  - {}: {:.1}\n", entry.month, entry.score));
        } else {
            out.push_str(&format!("  - {}: no submission\n", entry.month));
        }
    }

    out
}
