use super::super::comparison::compare;
use super::super::consistency::ConsistencyEvaluator;
use super::super::domain::{KpiSnapshot, MonthKey, Role};
use super::super::goals::progress;
use super::super::percent::clamped_percent;
use super::super::profile::{GoalTargets, RoleProfile};
use super::super::scoring::score;
use super::super::trend::{trend, MetricTrend};
use super::insights::{generate_insights, InsightContext};
use super::rules::INSIGHT_RULES;
use super::views::{MonthlyBreakdownEntry, Report, ReportSummary};
use crate::config::AnalyticsConfig;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("no KPI snapshots recorded for the {role} role yet")]
    InsufficientData { role: Role },
}

/// Builds [`Report`]s from caller-ordered snapshot histories. Holds only
/// tuning knobs; every build is a pure function of its arguments.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    consistency: ConsistencyEvaluator,
    fill_missing_months: bool,
}

impl ReportAssembler {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            consistency: ConsistencyEvaluator::new(config.consistency_penalty),
            fill_missing_months: config.fill_missing_months,
        }
    }

    /// List months without a submission in the breakdown (score 0).
    pub fn with_gap_filling(mut self, enabled: bool) -> Self {
        self.fill_missing_months = enabled;
        self
    }

    /// Report for `role` using the registry profile and its goal targets.
    pub fn build_for_role(
        &self,
        snapshots: &[KpiSnapshot],
        role: Role,
    ) -> Result<Report, ReportError> {
        let profile = RoleProfile::for_role(role);
        self.build(snapshots, profile, profile.goal_targets())
    }

    /// `snapshots` must be ordered oldest to newest.
    pub fn build(
        &self,
        snapshots: &[KpiSnapshot],
        profile: &RoleProfile,
        goals: &GoalTargets,
    ) -> Result<Report, ReportError> {
        let role = profile.role();
        let (latest, earlier) = snapshots
            .split_last()
            .ok_or(ReportError::InsufficientData { role })?;
        let previous = earlier.last();

        let scores: Vec<f64> = snapshots
            .iter()
            .map(|snapshot| score(snapshot, profile))
            .collect();
        let score_trend = trend(&scores);
        let trends = metric_trends(snapshots);
        let consistency_score = self.consistency.evaluate(&scores);
        let summary = summarize(&scores, score_trend.as_ref(), consistency_score);

        let context = InsightContext {
            role,
            latest,
            trends: &trends,
            current_score: summary.current_score,
            score_trend: score_trend.as_ref(),
            consistency: consistency_score,
        };
        let (insights, recommendations) = generate_insights(&context, INSIGHT_RULES);

        let comparative_analysis = compare(latest, previous);
        let goal_tracking = progress(latest, goals);
        let monthly_breakdown = self.breakdown(snapshots, &scores);

        debug!(
            %role,
            user_id = %latest.user_id,
            data_points = snapshots.len(),
            current_score = summary.current_score,
            "assembled performance report"
        );

        Ok(Report {
            user_id: latest.user_id.clone(),
            role,
            summary,
            trends,
            insights,
            recommendations,
            monthly_breakdown,
            comparative_analysis,
            goal_tracking,
        })
    }

    fn breakdown(&self, snapshots: &[KpiSnapshot], scores: &[f64]) -> Vec<MonthlyBreakdownEntry> {
        // Later entries for the same month replace earlier ones.
        let mut by_month: BTreeMap<MonthKey, f64> = BTreeMap::new();
        for (snapshot, &value) in snapshots.iter().zip(scores) {
            by_month.insert(snapshot.month, value);
        }

        let mut entries: Vec<MonthlyBreakdownEntry> = by_month
            .iter()
            .map(|(&month, &score)| MonthlyBreakdownEntry {
                month,
                score,
                has_submission: true,
            })
            .collect();

        if self.fill_missing_months {
            if let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().last()) {
                let mut cursor = first;
                while cursor < last {
                    if !by_month.contains_key(&cursor) {
                        entries.push(MonthlyBreakdownEntry {
                            month: cursor,
                            score: 0.0,
                            has_submission: false,
                        });
                    }
                    cursor = cursor.next();
                }
            }
        }

        entries.sort_by(|a, b| b.month.cmp(&a.month));
        entries
    }
}

/// Report for `role` with default tuning.
pub fn build(
    snapshots: &[KpiSnapshot],
    role: Role,
    goals: &GoalTargets,
) -> Result<Report, ReportError> {
    ReportAssembler::default().build(snapshots, RoleProfile::for_role(role), goals)
}

fn metric_trends(snapshots: &[KpiSnapshot]) -> BTreeMap<String, MetricTrend> {
    let names: BTreeSet<&str> = snapshots
        .iter()
        .flat_map(|snapshot| snapshot.metrics.keys().map(String::as_str))
        .collect();

    names
        .into_iter()
        .filter_map(|name| {
            let series: Vec<f64> = snapshots
                .iter()
                .map(|snapshot| snapshot.metric(name))
                .collect();
            trend(&series).map(|result| (name.to_string(), result))
        })
        .collect()
}

fn summarize(
    scores: &[f64],
    score_trend: Option<&MetricTrend>,
    consistency_score: f64,
) -> ReportSummary {
    let current_score = scores.last().copied().unwrap_or(0.0);
    let previous_score = match scores.len() {
        0 | 1 => current_score,
        n => scores[n - 2],
    };
    let improvement = current_score - previous_score;
    let average_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    let best_score = scores.iter().copied().reduce(f64::max).unwrap_or(0.0);

    ReportSummary {
        current_score,
        previous_score,
        best_score,
        average_score,
        improvement,
        improvement_percent: clamped_percent(improvement, previous_score),
        consistency_score,
        score_trend: score_trend.map(|trend| trend.direction),
        total_data_points: scores.len(),
    }
}
