use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Role, SnapshotSubmission, UserId};
use super::profile::GoalTargets;
use super::report::ReportError;
use super::repository::SnapshotRepository;
use super::service::{PerformanceService, PerformanceServiceError};

/// Stateless report request carrying the full snapshot history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub snapshots: Vec<SnapshotSubmission>,
    #[serde(default)]
    pub goals: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotUpsertRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub submission: SnapshotSubmission,
}

/// Router builder exposing report generation and snapshot intake.
pub fn performance_router<R>(service: Arc<PerformanceService<R>>) -> Router
where
    R: SnapshotRepository + 'static,
{
    Router::new()
        .route("/api/v1/performance/report", post(report_handler::<R>))
        .route("/api/v1/performance/snapshots", put(upsert_handler::<R>))
        .route(
            "/api/v1/performance/:user_id/:role/report",
            get(stored_report_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    let ReportRequest {
        user_id,
        role,
        snapshots,
        goals,
    } = request;
    let role = Role::parse(role.as_deref().unwrap_or_default());

    let goals = match goals.map(GoalTargets::new).transpose() {
        Ok(goals) => goals,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    let snapshots = snapshots
        .into_iter()
        .map(|submission| submission.into_snapshot(user_id.clone(), role))
        .collect();

    match service.report_from(snapshots, role, goals.as_ref()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn upsert_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    axum::Json(request): axum::Json<SnapshotUpsertRequest>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    let role = Role::parse(request.role.as_deref().unwrap_or_default());
    match service.record(request.user_id, role, request.submission) {
        Ok(snapshot) => {
            let payload = json!({
                "user_id": snapshot.user_id,
                "role": snapshot.role,
                "month": snapshot.month,
                "metrics": snapshot.metrics.len(),
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stored_report_handler<R>(
    State(service): State<Arc<PerformanceService<R>>>,
    Path((user_id, role)): Path<(String, String)>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    match service.report(&UserId(user_id), Role::parse(&role)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PerformanceServiceError) -> Response {
    match error {
        PerformanceServiceError::Report(ReportError::InsufficientData { .. }) => {
            let payload = json!({
                "error": error.to_string(),
                "status": "no_data",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            tracing::error!(error = %other, "performance request failed");
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
