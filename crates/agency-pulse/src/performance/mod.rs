//! Performance analytics over monthly KPI snapshots.
//!
//! The engine (`scoring`, `trend`, `consistency`, `comparison`, `goals`
//! and `report`) is synchronous and stateless; `service`, `repository`,
//! `router` and `import` wrap it for the binary.

pub mod comparison;
pub mod consistency;
pub mod domain;
pub mod goals;
pub mod import;
mod percent;
pub mod profile;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod trend;

#[cfg(test)]
mod tests;

pub use comparison::{compare, MetricComparison};
pub use consistency::{consistency, ConsistencyEvaluator};
pub use domain::{
    InsightSeverity, KpiSnapshot, MonthKey, MonthKeyError, Role, SnapshotSubmission,
    TrendDirection, UserId,
};
pub use goals::{progress, GoalProgress};
pub use import::{SnapshotImportError, SnapshotImporter};
pub use profile::{GoalTargets, MetricScale, ProfileError, RoleProfile};
pub use report::{build, Report, ReportAssembler, ReportError};
pub use repository::{order_oldest_first, RepositoryError, SnapshotRepository};
pub use router::performance_router;
pub use scoring::score;
pub use service::{PerformanceService, PerformanceServiceError};
pub use trend::{trend, MetricTrend};
