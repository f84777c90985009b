use crate::config::ConfigError;
use crate::performance::{PerformanceServiceError, ReportError, SnapshotImportError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(SnapshotImportError),
    Performance(PerformanceServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Performance(err) => write!(f, "performance error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Performance(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Performance(PerformanceServiceError::Report(
                ReportError::InsufficientData { .. },
            )) => StatusCode::NOT_FOUND,
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Performance(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SnapshotImportError> for AppError {
    fn from(value: SnapshotImportError) -> Self {
        Self::Import(value)
    }
}

impl From<PerformanceServiceError> for AppError {
    fn from(value: PerformanceServiceError) -> Self {
        Self::Performance(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Performance(PerformanceServiceError::Report(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::Role;

    #[test]
    fn missing_data_maps_to_not_found() {
        let error = AppError::from(ReportError::InsufficientData { role: Role::Hr });
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn import_errors_map_to_bad_request() {
        let error = AppError::from(SnapshotImportError::MissingColumn("month"));
        assert!(error.to_string().contains("'month'"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
