use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use wolf_hire::error::AppError;
use wolf_hire::workflows::hiring::HiringManager;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load every position from `path`. A file that does not exist yet starts an empty manager;
/// any other read failure is an error.
pub(crate) fn open_manager(path: &Path) -> Result<HiringManager, AppError> {
    let mut manager = HiringManager::new();
    if path.exists() {
        manager.load_positions_from_file(path)?;
    } else {
        info!(path = %path.display(), "positions file not found; starting without positions");
    }
    Ok(manager)
}
