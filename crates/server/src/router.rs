use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/status", get(handlers::status_handler))
        .route("/api/connect", post(handlers::connect_handler))
        .route("/api/explore", get(handlers::explore_handler))
        .route(
            "/api/documentation",
            get(handlers::get_documentation_handler).post(handlers::save_documentation_handler),
        )
        .route("/api/query", post(handlers::execute_query_handler))
        .route("/api/generate-query", post(handlers::generate_query_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
