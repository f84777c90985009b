use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::config::AnalyticsConfig;
use crate::performance::domain::{KpiSnapshot, MonthKey, Role, UserId};
use crate::performance::repository::{RepositoryError, SnapshotRepository};
use crate::performance::service::PerformanceService;

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<BTreeMap<(UserId, Role, MonthKey), KpiSnapshot>>,
    unavailable: bool,
}

impl SnapshotRepository for MemoryRepository {
    fn list_snapshots(
        &self,
        user_id: &UserId,
        role: Role,
    ) -> Result<Vec<KpiSnapshot>, RepositoryError> {
        if self.unavailable {
            return Err(RepositoryError::Unavailable("maintenance window".to_string()));
        }
        let guard = self.records.lock().expect("repository mutex poisoned");
        // Newest first, the way the hosted database returns them.
        Ok(guard
            .values()
            .rev()
            .filter(|snapshot| &snapshot.user_id == user_id && snapshot.role == role)
            .cloned()
            .collect())
    }

    fn upsert(&self, snapshot: KpiSnapshot) -> Result<(), RepositoryError> {
        if self.unavailable {
            return Err(RepositoryError::Unavailable("maintenance window".to_string()));
        }
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(
            (snapshot.user_id.clone(), snapshot.role, snapshot.month),
            snapshot,
        );
        Ok(())
    }
}

impl MemoryRepository {
    pub(super) fn unavailable() -> Self {
        Self {
            records: Mutex::default(),
            unavailable: true,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

pub(super) fn analytics_config() -> AnalyticsConfig {
    AnalyticsConfig {
        consistency_penalty: 2.0,
        fill_missing_months: false,
    }
}

pub(super) fn build_service() -> (PerformanceService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PerformanceService::new(repository.clone(), &analytics_config());
    (service, repository)
}

pub(super) fn freelancer_snapshot(month: &str, metrics: &[(&str, f64)]) -> KpiSnapshot {
    let month: MonthKey = month.parse().expect("valid month");
    KpiSnapshot {
        user_id: UserId::from("free-12"),
        role: Role::Freelancer,
        month,
        metrics: metrics
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect(),
        created_at: Utc
            .with_ymd_and_hms(month.year(), month.month(), 27, 16, 30, 0)
            .unwrap(),
    }
}

pub(super) fn freelancer_history() -> Vec<KpiSnapshot> {
    vec![
        freelancer_snapshot(
            "2024-01",
            &[
                ("deadline_adherence", 92.0),
                ("client_satisfaction", 94.0),
                ("work_quality", 88.0),
                ("communication", 85.0),
                ("project_completion", 90.0),
            ],
        ),
        freelancer_snapshot(
            "2024-02",
            &[
                ("deadline_adherence", 78.0),
                ("client_satisfaction", 86.0),
                ("work_quality", 84.0),
                ("communication", 80.0),
                ("project_completion", 85.0),
            ],
        ),
        freelancer_snapshot(
            "2024-03",
            &[
                ("deadline_adherence", 65.0),
                ("client_satisfaction", 80.0),
                ("work_quality", 82.0),
                ("communication", 78.0),
                ("project_completion", 70.0),
            ],
        ),
    ]
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json")
}
