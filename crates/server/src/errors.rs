use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dbsage::QueryError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the
/// server, allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors originating from the `dbsage` library.
    Query(QueryError),
    /// Caller input errors that never reach the library.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::Query(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Query(err) => {
                // Log the original error for debugging purposes.
                error!("QueryError: {:?}", err);
                match err {
                    QueryError::NoActiveConnection => {
                        (StatusCode::BAD_REQUEST, "Not connected to database".to_string())
                    }
                    QueryError::EmptyQuestion => {
                        (StatusCode::BAD_REQUEST, "Question is required".to_string())
                    }
                    QueryError::NoQueryGenerated => (
                        StatusCode::BAD_REQUEST,
                        "Could not generate query from question".to_string(),
                    ),
                    QueryError::UnsupportedDialect(url) => (
                        StatusCode::BAD_REQUEST,
                        format!("Unsupported connection string: {url}"),
                    ),
                    QueryError::StorageConnection(e) => (
                        StatusCode::BAD_REQUEST,
                        format!("Database connection failed: {e}"),
                    ),
                    QueryError::StorageQueryFailed(e) => (
                        StatusCode::BAD_REQUEST,
                        format!("Query execution failed: {e}"),
                    ),
                    QueryError::SchemaIntrospection(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Schema introspection failed: {e}"),
                    ),
                    QueryError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    QueryError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    QueryError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    QueryError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                }
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
