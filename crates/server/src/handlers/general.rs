//! # General Route Handlers
//!
//! The root, health check, and connection status endpoints.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub connected: bool,
    pub has_schema: bool,
    pub has_documentation: bool,
}

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "dbsage server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Reports the current connection status.
pub async fn status_handler(State(app_state): State<AppState>) -> Json<StatusResponse> {
    let session = app_state.session.read().await;
    Json(StatusResponse {
        connected: session.is_some(),
        has_schema: session.as_ref().is_some_and(|s| s.schema.is_some()),
        has_documentation: session.as_ref().is_some_and(|s| !s.documentation.is_empty()),
    })
}
