//! # Query Route Handlers
//!
//! Raw SQL execution (guarded to SELECT) and natural-language query
//! generation — the core endpoint of the server.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, Json};
use dbsage::{QueryError, QueryGenerationResult};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize, Debug)]
pub struct ExecuteQueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Deserialize, Debug)]
pub struct GenerateQueryRequest {
    #[serde(default)]
    pub question: String,
}

/// Executes a SQL query and returns rows and columns.
///
/// Safety gate: only SELECT statements are accepted. Generated queries from
/// the AI path are not guaranteed to be SELECTs, so this check is the single
/// execution-side backstop.
pub async fn execute_query_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ExecuteQueryRequest>,
) -> Result<Json<Value>, AppError> {
    let query = payload.query.trim().to_string();

    let provider = {
        let session = app_state.session.read().await;
        session
            .as_ref()
            .ok_or(AppError::Query(QueryError::NoActiveConnection))?
            .provider
            .clone()
    };

    if query.is_empty() {
        return Err(AppError::BadRequest("Query is required".to_string()));
    }

    if !query.to_uppercase().starts_with("SELECT") {
        return Err(AppError::BadRequest(
            "Only SELECT queries are allowed for safety".to_string(),
        ));
    }

    let result = provider.execute_query(&query).await?;

    Ok(Json(json!({
        "success": true,
        "columns": result.columns,
        "row_count": result.rows.len(),
        "data": result.rows,
    })))
}

/// Generates a SQL query from a natural language question.
///
/// Requires an active connection; the schema is scanned lazily on the first
/// generation request if no explore has run yet.
pub async fn generate_query_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<GenerateQueryRequest>,
) -> Result<Json<QueryGenerationResult>, AppError> {
    let question = payload.question.trim().to_string();
    info!("Received generation request for question: {question:?}");

    let (provider, schema, documentation) = {
        let session = app_state.session.read().await;
        let session = session
            .as_ref()
            .ok_or(AppError::Query(QueryError::NoActiveConnection))?;
        (
            session.provider.clone(),
            session.schema.clone(),
            session.documentation.clone(),
        )
    };

    if question.is_empty() {
        return Err(AppError::Query(QueryError::EmptyQuestion));
    }

    // Lazy-load the schema if no explore has run since connecting. Concurrent
    // first requests may both scan; each caches a complete snapshot.
    let schema = match schema {
        Some(schema) => schema,
        None => {
            info!("No cached schema; running a full scan before generation");
            let scanned = Arc::new(provider.introspect().await?);
            if let Some(session) = app_state.session.write().await.as_mut() {
                session.schema = Some(scanned.clone());
            }
            scanned
        }
    };

    let result = app_state
        .query_client
        .generate_query(&question, &schema, &documentation)
        .await?;

    Ok(Json(result))
}
