//! # Connection Route Handlers
//!
//! Connecting to a database and exploring its schema.

use crate::{
    errors::AppError,
    state::{AppState, DbSession},
};
use axum::{extract::State, Json};
use dbsage::{providers::db, QueryError, SchemaDescription};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{collections::HashMap, sync::Arc};
use tracing::info;

#[derive(Deserialize, Debug)]
pub struct ConnectRequest {
    #[serde(default)]
    pub connection_string: String,
}

#[derive(Serialize)]
pub struct ExploreResponse {
    pub success: bool,
    pub schema: SchemaDescription,
}

/// Connects to a database using the provided connection string.
///
/// A successful connect installs a fresh session: any previous connection,
/// schema snapshot, and documentation are discarded.
pub async fn connect_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ConnectRequest>,
) -> Result<Json<Value>, AppError> {
    let connection_string = payload.connection_string.trim().to_string();
    if connection_string.is_empty() {
        return Err(AppError::BadRequest(
            "Connection string is required".to_string(),
        ));
    }

    let provider = db::connect(&connection_string).await?;
    info!(provider = provider.name(), "Connected to database");

    let mut session = app_state.session.write().await;
    *session = Some(DbSession {
        provider,
        schema: None,
        documentation: HashMap::new(),
    });

    Ok(Json(json!({
        "success": true,
        "message": "Successfully connected to the database"
    })))
}

/// Runs a full schema scan and caches the snapshot in the session.
///
/// Two concurrent explores may both scan; each writes a complete snapshot, so
/// last-write-wins is harmless. The session lock is never held across a scan.
pub async fn explore_handler(
    State(app_state): State<AppState>,
) -> Result<Json<ExploreResponse>, AppError> {
    let provider = {
        let session = app_state.session.read().await;
        session
            .as_ref()
            .ok_or(AppError::Query(QueryError::NoActiveConnection))?
            .provider
            .clone()
    };

    let schema = Arc::new(provider.introspect().await?);

    if let Some(session) = app_state.session.write().await.as_mut() {
        session.schema = Some(schema.clone());
    }

    Ok(Json(ExploreResponse {
        success: true,
        schema: (*schema).clone(),
    }))
}
