//! # Documentation Route Handlers
//!
//! Saving and retrieving user-provided table documentation. The documentation
//! lives in the active session and feeds the AI prompt context during query
//! generation.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, Json};
use dbsage::{QueryError, TableDocumentation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Deserialize, Debug)]
pub struct DocumentationRequest {
    #[serde(default)]
    pub documentation: HashMap<String, TableDocumentation>,
}

#[derive(Serialize)]
pub struct DocumentationResponse {
    pub success: bool,
    pub documentation: HashMap<String, TableDocumentation>,
}

/// Saves documentation for the connected database's tables.
pub async fn save_documentation_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<DocumentationRequest>,
) -> Result<Json<Value>, AppError> {
    let mut guard = app_state.session.write().await;
    let session = guard
        .as_mut()
        .ok_or(AppError::Query(QueryError::NoActiveConnection))?;

    session.documentation = payload.documentation;

    Ok(Json(json!({
        "success": true,
        "message": "Documentation saved successfully"
    })))
}

/// Returns the current documentation.
pub async fn get_documentation_handler(
    State(app_state): State<AppState>,
) -> Result<Json<DocumentationResponse>, AppError> {
    let guard = app_state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or(AppError::Query(QueryError::NoActiveConnection))?;

    Ok(Json(DocumentationResponse {
        success: true,
        documentation: session.documentation.clone(),
    }))
}
