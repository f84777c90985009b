use std::sync::Arc;

use super::domain::{KpiSnapshot, Role, SnapshotSubmission, UserId};
use super::profile::{GoalTargets, RoleProfile};
use super::report::{Report, ReportAssembler, ReportError};
use super::repository::{order_oldest_first, RepositoryError, SnapshotRepository};
use crate::config::AnalyticsConfig;
use tracing::info;

/// Composes the snapshot repository with the report assembler.
pub struct PerformanceService<R> {
    repository: Arc<R>,
    assembler: ReportAssembler,
}

impl<R> PerformanceService<R>
where
    R: SnapshotRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: &AnalyticsConfig) -> Self {
        Self {
            repository,
            assembler: ReportAssembler::new(config),
        }
    }

    /// Stores a monthly submission, replacing any earlier one for the month.
    pub fn record(
        &self,
        user_id: UserId,
        role: Role,
        submission: SnapshotSubmission,
    ) -> Result<KpiSnapshot, PerformanceServiceError> {
        let snapshot = submission.into_snapshot(user_id, role);
        self.repository.upsert(snapshot.clone())?;
        info!(
            user_id = %snapshot.user_id,
            %role,
            month = %snapshot.month,
            metrics = snapshot.metrics.len(),
            "recorded kpi snapshot"
        );
        Ok(snapshot)
    }

    /// Report over everything stored for the user under `role`, scored
    /// against the role's registry goals.
    pub fn report(&self, user_id: &UserId, role: Role) -> Result<Report, PerformanceServiceError> {
        let snapshots = self.repository.list_snapshots(user_id, role)?;
        self.report_from(snapshots, role, None)
    }

    /// Report over caller-supplied snapshots. `goals` overrides the role's
    /// registry targets when present.
    pub fn report_from(
        &self,
        mut snapshots: Vec<KpiSnapshot>,
        role: Role,
        goals: Option<&GoalTargets>,
    ) -> Result<Report, PerformanceServiceError> {
        order_oldest_first(&mut snapshots);
        let profile = RoleProfile::for_role(role);
        let goals = goals.unwrap_or_else(|| profile.goal_targets());
        Ok(self.assembler.build(&snapshots, profile, goals)?)
    }
}

/// Error raised by the performance service.
#[derive(Debug, thiserror::Error)]
pub enum PerformanceServiceError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
