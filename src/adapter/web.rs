use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use crate::adapter::decode::decode_roles;
use crate::adapter::derive::policy_from_roles;
use crate::adapter::directives::DIRECTIVE_TABLE;
use crate::adapter::errors::AdapterError;
use crate::adapter::reconcile::{reconcile_with_report, ReconcileOptions};
use crate::adapter::types::{DeriveRequest, ReconcileRequest, ReconcileResponse};

/// Shared, read-only state for the HTTP handlers.
#[derive(Debug, Clone)]
pub struct AdapterState {
    pub options: ReconcileOptions,
    /// Catalog used when a request does not bring its own
    pub catalog: Value,
}

pub fn router(state: Arc<AdapterState>) -> Router {
    Router::new()
        .route("/v1/reconcile", post(handle_reconcile))
        .route("/v1/policy", post(handle_policy))
        .route("/v1/directives", get(handle_directives))
        .route("/healthz", get(health))
        .with_state(state)
}

async fn handle_reconcile(
    State(state): State<Arc<AdapterState>>,
    Json(req): Json<ReconcileRequest>,
) -> impl IntoResponse {
    let catalog = req.catalog.as_ref().unwrap_or(&state.catalog);
    let outcome = reconcile_with_report(&req.policy, &req.roles, catalog, &state.options);
    outcome.log_diagnostics();

    let diagnostics = outcome
        .diagnostics
        .iter()
        .map(AdapterError::to_entry)
        .collect();
    Json(ReconcileResponse {
        roles: outcome.roles,
        diagnostics,
    })
}

async fn handle_policy(Json(req): Json<DeriveRequest>) -> impl IntoResponse {
    match decode_roles(&req.roles) {
        Ok(decoded) => {
            for rejected in &decoded.rejected {
                tracing::warn!(error = %rejected, "ignoring malformed role");
            }
            Json(policy_from_roles(&decoded.roles)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn handle_directives() -> impl IntoResponse {
    Json(DIRECTIVE_TABLE)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
