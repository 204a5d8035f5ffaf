#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Spawns the server on a random port and seeds throwaway SQLite databases
//! for the API tests.

use dbsage::providers::db::sqlite::SqliteProvider;
use dbsage_server::config::AppConfig;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

/// A configuration with no AI provider: generation is pattern-only.
pub fn pattern_only_config() -> AppConfig {
    AppConfig {
        port: 0,
        ai_provider: None,
        ai_api_url: None,
        ai_api_key: None,
        ai_model: None,
    }
}

/// A configuration pointing the local AI provider at a mock server.
pub fn local_ai_config(api_url: String) -> AppConfig {
    AppConfig {
        port: 0,
        ai_provider: Some("local".to_string()),
        ai_api_url: Some(api_url),
        ai_api_key: None,
        ai_model: None,
    }
}

/// Starts the server on a random port and returns its base address.
pub async fn spawn_app(config: AppConfig) -> String {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{port}");

    tokio::spawn(async move {
        if let Err(e) = dbsage_server::run(listener, config).await {
            eprintln!("Server error: {e}");
        }
    });

    // Give the server a moment to start.
    sleep(Duration::from_millis(100)).await;

    address
}

/// Creates a seeded SQLite database inside `dir` and returns its URL.
pub async fn seeded_db_url(dir: &tempfile::TempDir) -> String {
    let db_path = dir.path().join("api.db");
    let url = format!("sqlite://{}?mode=rwc", db_path.display());

    let provider = SqliteProvider::connect(&url)
        .await
        .expect("Failed to create test database");
    provider
        .initialize_with_data(
            "CREATE TABLE products (
                 id INTEGER PRIMARY KEY,
                 title TEXT NOT NULL,
                 price REAL
             );
             INSERT INTO products (title, price) VALUES
                 ('Desk', 120.0), ('Lamp', 35.5), ('Chair', 89.99)",
        )
        .await
        .expect("Failed to seed test database");

    url
}
