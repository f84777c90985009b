use agency_pulse::performance::{
    KpiSnapshot, MonthKey, RepositoryError, Role, SnapshotRepository, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type SnapshotKey = (UserId, Role, MonthKey);

/// Process-local snapshot store keyed by `(user_id, role, month)`.
#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotRepository {
    records: Arc<Mutex<HashMap<SnapshotKey, KpiSnapshot>>>,
}

impl InMemorySnapshotRepository {
    fn guard(&self) -> Result<MutexGuard<'_, HashMap<SnapshotKey, KpiSnapshot>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("snapshot store lock poisoned".to_string()))
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn list_snapshots(
        &self,
        user_id: &UserId,
        role: Role,
    ) -> Result<Vec<KpiSnapshot>, RepositoryError> {
        let guard = self.guard()?;
        Ok(guard
            .values()
            .filter(|snapshot| &snapshot.user_id == user_id && snapshot.role == role)
            .cloned()
            .collect())
    }

    fn upsert(&self, snapshot: KpiSnapshot) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        let key = (snapshot.user_id.clone(), snapshot.role, snapshot.month);
        guard.insert(key, snapshot);
        Ok(())
    }
}
