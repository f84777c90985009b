use super::domain::{KpiSnapshot, Role, UserId};

/// Storage abstraction for monthly KPI snapshots so the service can be
/// exercised without the hosted database.
pub trait SnapshotRepository: Send + Sync {
    /// Snapshots for one user under one role. Implementations may return
    /// them in any order; the service orders them before building reports.
    fn list_snapshots(
        &self,
        user_id: &UserId,
        role: Role,
    ) -> Result<Vec<KpiSnapshot>, RepositoryError>;

    /// Inserts or replaces the snapshot keyed by `(user_id, role, month)`.
    fn upsert(&self, snapshot: KpiSnapshot) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sorts by month, then submission time, oldest first. Stable, so equal
/// keys keep their delivery order.
pub fn order_oldest_first(snapshots: &mut [KpiSnapshot]) {
    snapshots.sort_by(|a, b| {
        a.month
            .cmp(&b.month)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}
