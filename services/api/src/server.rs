use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySnapshotRepository};
use crate::routes::with_operational_routes;
use agency_pulse::config::AppConfig;
use agency_pulse::error::AppError;
use agency_pulse::performance::PerformanceService;
use agency_pulse::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySnapshotRepository::default());
    let performance_service = Arc::new(PerformanceService::new(repository, &config.analytics));

    let app = with_operational_routes(performance_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        consistency_penalty = config.analytics.consistency_penalty,
        fill_missing_months = config.analytics.fill_missing_months,
        "performance analytics service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
