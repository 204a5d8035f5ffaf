use crate::errors::QueryError;
use crate::types::SchemaDescription;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// The rows and column names produced by executing a query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// A trait for interacting with a database backend.
///
/// This trait defines a common interface for executing queries and scanning
/// schema information across the supported dialects (SQLite, PostgreSQL,
/// MySQL). The introspection output shape is the contract; the dialect SQL
/// behind it differs completely per provider.
#[async_trait]
pub trait Storage: Send + Sync + DynClone + Debug {
    /// Returns the name of the storage provider (e.g. "SQLite", "PostgreSQL").
    fn name(&self) -> &str;

    /// Executes a SQL query and returns the decoded rows.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult, QueryError>;

    /// Runs a full schema scan: user tables, columns, foreign keys, row
    /// counts, and up to 5 sample rows per table.
    ///
    /// Any sub-query failure aborts the entire scan; a partial schema is
    /// never returned.
    async fn introspect(&self) -> Result<SchemaDescription, QueryError>;
}

dyn_clone::clone_trait_object!(Storage);
