use crate::cli::ServeArgs;
use crate::infra::{open_manager, AppState};
use crate::routes::with_hiring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wolf_hire::config::AppConfig;
use wolf_hire::error::AppError;
use wolf_hire::telemetry;
use wolf_hire::workflows::hiring::{HiringManager, HiringState};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.positions_file.take() {
        config.storage.positions_file = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let storage = config.storage.positions_file.clone();
    let manager = match storage.as_deref() {
        Some(path) => open_manager(path)?,
        None => HiringManager::new(),
    };
    info!(
        positions = manager.positions().len(),
        active = manager.active_position_name().unwrap_or("none"),
        "hiring positions loaded"
    );

    let app = with_hiring_routes(HiringState::new(manager, storage))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hiring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
