use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::adapter::loader::load_catalog;
use crate::adapter::web::{router, AdapterState};
use crate::adapter::ReconcileOptions;
use crate::errors::AppError;
use crate::settings::Settings;

/// Build the shared handler state from settings.
pub fn build_state(settings: &Settings) -> Result<AdapterState, AppError> {
    let catalog = load_catalog(settings.adapter.catalog_path.as_deref())?;
    Ok(AdapterState {
        options: ReconcileOptions {
            retention: settings.adapter.retention,
        },
        catalog,
    })
}

pub async fn serve(settings: Settings) -> Result<(), AppError> {
    let state = Arc::new(build_state(&settings)?);

    let addr: SocketAddr = settings
        .listen_addr()
        .parse()
        .map_err(|e| AppError::Other(format!("bad listen addr: {e}")))?;

    let app = router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, retention = ?settings.adapter.retention, "Policy/role adapter listening");

    axum::serve(listener, app).await?;
    Ok(())
}
