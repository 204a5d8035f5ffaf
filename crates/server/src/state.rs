//! # Application State
//!
//! Defines the shared application state (`AppState`) and the logic for
//! building it at startup. The one database connection and its cached schema
//! snapshot live in an explicit session object behind a lock, passed into
//! every handler through `AppState` — there are no hidden globals.

use crate::config::AppConfig;
use dbsage::{
    providers::{
        ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
        db::storage::Storage,
    },
    QueryClient, QueryClientBuilder, SchemaDescription, TableDocumentation,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// The active database session: one connection, its latest schema snapshot,
/// and the user-authored table documentation.
///
/// Reconnecting replaces the whole session; the schema and documentation are
/// discarded with it. The schema is `None` until the first explore or
/// generation request scans it.
pub struct DbSession {
    pub provider: Box<dyn Storage>,
    pub schema: Option<Arc<SchemaDescription>>,
    pub documentation: HashMap<String, TableDocumentation>,
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from the environment.
    pub config: Arc<AppConfig>,
    /// The query generation client (AI provider optional).
    pub query_client: Arc<QueryClient>,
    /// The single active database session, if any.
    pub session: Arc<RwLock<Option<DbSession>>>,
}

/// Builds the shared application state from the configuration.
///
/// Instantiates the AI provider if one is configured; without one, every
/// generation request uses the pattern synthesizer.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider: Option<Box<dyn AiProvider>> = match config.ai_provider.as_deref() {
        Some("gemini") => {
            let api_key = config
                .ai_api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("AI_API_KEY is required for the gemini provider"))?;
            // If no API URL is provided, construct it from the model name.
            let api_url = match config.ai_api_url.clone() {
                Some(url) => url,
                None => {
                    let model = config.ai_model.as_deref().ok_or_else(|| {
                        anyhow::anyhow!("AI_MODEL or AI_API_URL is required for the gemini provider")
                    })?;
                    format!(
                        "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
                    )
                }
            };
            Some(Box::new(GeminiProvider::new(api_url, api_key)?))
        }
        Some("local") => {
            let api_url = config
                .ai_api_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("AI_API_URL is required for the local provider"))?;
            Some(Box::new(LocalAiProvider::new(
                api_url,
                config.ai_api_key.clone(),
                config.ai_model.clone(),
            )?))
        }
        Some(other) => {
            return Err(anyhow::anyhow!("Unsupported AI provider: {other}"));
        }
        None => {
            tracing::info!("No AI provider configured; using pattern-based generation only");
            None
        }
    };

    let mut builder = QueryClientBuilder::new();
    if let Some(provider) = ai_provider {
        builder = builder.ai_provider(provider);
    }

    Ok(AppState {
        config: Arc::new(config),
        query_client: Arc::new(builder.build()),
        session: Arc::new(RwLock::new(None)),
    })
}
