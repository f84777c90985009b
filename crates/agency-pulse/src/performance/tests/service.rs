use super::common::*;
use crate::performance::domain::{
    InsightSeverity, Role, SnapshotSubmission, TrendDirection, UserId,
};
use crate::performance::profile::GoalTargets;
use crate::performance::report::ReportError;
use crate::performance::repository::{RepositoryError, SnapshotRepository};
use crate::performance::service::{PerformanceService, PerformanceServiceError};
use serde_json::json;
use std::sync::Arc;

fn submission(value: serde_json::Value) -> SnapshotSubmission {
    serde_json::from_value(value).expect("valid submission")
}

#[test]
fn report_reorders_newest_first_repository_output() {
    let (service, repository) = build_service();
    for snapshot in freelancer_history() {
        repository.upsert(snapshot).expect("upsert succeeds");
    }

    let report = service
        .report(&UserId::from("free-12"), Role::Freelancer)
        .expect("report builds");

    assert_eq!(report.role, Role::Freelancer);
    assert_eq!(report.summary.total_data_points, 3);
    assert_eq!(report.monthly_breakdown[0].month.to_string(), "2024-03");
    assert!((report.summary.current_score - 75.0).abs() < 1e-9);
    assert!((report.summary.previous_score - 82.6).abs() < 1e-9);
    assert!(report.summary.improvement < 0.0);
    assert_eq!(report.summary.improvement_percent, 0);
    assert_eq!(report.summary.score_trend, Some(TrendDirection::Downward));
    assert_eq!(
        report.trends["deadline_adherence"].direction,
        TrendDirection::Downward
    );
}

#[test]
fn declining_freelancer_gets_warnings_and_recommendations() {
    let (service, _) = build_service();
    let report = service
        .report_from(freelancer_history(), Role::Freelancer, None)
        .expect("report builds");

    let warnings: Vec<&str> = report
        .insights
        .iter()
        .filter(|insight| insight.severity == InsightSeverity::Warning)
        .map(|insight| insight.message.as_str())
        .collect();
    assert!(warnings.contains(&"Deadline adherence needs attention"));
    assert!(warnings.contains(&"Client satisfaction is slipping"));
    assert!(warnings.contains(&"Overall performance is trending downward"));
    assert!(report
        .recommendations
        .iter()
        .any(|item| item.contains("buffer time")));
}

#[test]
fn report_uses_role_goals_unless_overridden() {
    let (service, _) = build_service();
    let report = service
        .report_from(freelancer_history(), Role::Freelancer, None)
        .expect("report builds");
    assert_eq!(report.goal_tracking.len(), 4);
    assert_eq!(report.goal_tracking["deadline_adherence"].percent, 68);

    let goals = GoalTargets::new([("communication", 75.0)]).expect("valid goals");
    let report = service
        .report_from(freelancer_history(), Role::Freelancer, Some(&goals))
        .expect("report builds");
    assert_eq!(report.goal_tracking.len(), 1);
    assert!(report.goal_tracking["communication"].achieved);
}

#[test]
fn record_replaces_existing_month() {
    let (service, repository) = build_service();
    let user = UserId::from("intern-4");

    service
        .record(
            user.clone(),
            Role::Intern,
            submission(json!({ "month": "2024-05", "kpi_data": { "task_completion": 60 } })),
        )
        .expect("first submission");
    service
        .record(
            user.clone(),
            Role::Intern,
            submission(json!({ "month": "2024-05", "kpi_data": { "task_completion": 95 } })),
        )
        .expect("resubmission");

    assert_eq!(repository.len(), 1);
    let report = service.report(&user, Role::Intern).expect("report builds");
    assert_eq!(report.comparative_analysis["task_completion"].current, 95.0);
}

#[test]
fn report_without_snapshots_is_insufficient_data() {
    let (service, _) = build_service();
    match service.report(&UserId::from("nobody"), Role::Manager) {
        Err(PerformanceServiceError::Report(ReportError::InsufficientData { role })) => {
            assert_eq!(role, Role::Manager);
        }
        other => panic!("expected insufficient data, got {other:?}"),
    }
}

#[test]
fn repository_failures_propagate() {
    let repository = Arc::new(MemoryRepository::unavailable());
    let service = PerformanceService::new(repository, &analytics_config());

    match service.report(&UserId::from("free-12"), Role::Freelancer) {
        Err(PerformanceServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository error, got {other:?}"),
    }
}
