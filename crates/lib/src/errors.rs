use thiserror::Error;

/// Custom error types for the library.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Request to AI provider failed: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("Unsupported connection string: {0}")]
    UnsupportedDialect(String),
    #[error("Database connection failed: {0}")]
    StorageConnection(String),
    #[error("Query execution failed: {0}")]
    StorageQueryFailed(String),
    #[error("Schema introspection failed: {0}")]
    SchemaIntrospection(String),
    #[error("Not connected to database")]
    NoActiveConnection,
    #[error("Question is required")]
    EmptyQuestion,
    #[error("Could not generate query from question")]
    NoQueryGenerated,
}
