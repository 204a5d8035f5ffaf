//! # Application Configuration
//!
//! Loads the server configuration from environment variables (with `.env`
//! support via `dotenvy` in `start`). The AI provider settings are optional:
//! without them the server runs with the pattern synthesizer only.

use config::{Config as ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

/// The application configuration, resolved from the environment.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The AI provider type ("gemini" or "local"). Loaded from `AI_PROVIDER`.
    #[serde(default)]
    pub ai_provider: Option<String>,
    /// The AI API URL. Optional for Gemini, where it can be derived from the
    /// model name. Loaded from `AI_API_URL`.
    #[serde(default)]
    pub ai_api_url: Option<String>,
    /// The AI API key. Loaded from `AI_API_KEY`.
    #[serde(default)]
    pub ai_api_key: Option<String>,
    /// The model name. Loaded from `AI_MODEL`.
    #[serde(default)]
    pub ai_model: Option<String>,
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    5000
}

/// Loads the application configuration from environment variables.
pub fn get_config() -> Result<AppConfig, ConfigError> {
    let settings = ConfigBuilder::builder()
        .add_source(Environment::default())
        .build()?;

    settings.try_deserialize()
}
