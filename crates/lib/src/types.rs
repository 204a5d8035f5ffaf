use crate::providers::ai::AiProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The canonical, in-memory view of one connected database at one point in time.
///
/// A `SchemaDescription` is always the result of a full scan; it is replaced
/// wholesale on every (re)connection or explore and never updated incrementally.
/// Tables keep the enumeration order reported by the database — the pattern
/// synthesizer's "first table" fallback depends on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDescription {
    pub tables: Vec<TableDescription>,
}

impl SchemaDescription {
    /// Looks up a table by its exact name as reported by the source database.
    pub fn table(&self, name: &str) -> Option<&TableDescription> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// One table's normalized description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<ColumnDescription>,
    pub foreign_keys: Vec<ForeignKeyDescription>,
    /// Snapshot count at scan time; not kept up to date.
    pub row_count: i64,
    /// Up to 5 raw rows, captured for context only.
    pub sample_rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// One column, with its dialect-native type string left unnormalized.
///
/// Consumers that need semantic classification (e.g. "is numeric") must
/// pattern-match on substrings of `data_type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForeignKeyDescription {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// Human-authored notes for a table, fed into the AI prompt context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableDocumentation {
    #[serde(default)]
    pub description: Option<String>,
    /// Per-column notes, keyed by column name.
    #[serde(default)]
    pub columns: HashMap<String, String>,
}

/// Which synthesizer produced the final query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    Ai,
    Pattern,
}

/// The heuristic reliability report attached to every generated query.
///
/// `confidence` starts at 100 and is only ever decremented; no floor is
/// enforced, so heavily mismatched queries can score below zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub confidence: i32,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// The per-request result of query generation. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryGenerationResult {
    pub query: String,
    pub method: GenerationMethod,
    pub validation: ValidationReport,
}

/// A client that turns natural-language questions into SQL queries.
///
/// The AI provider is optional: without one, every question goes straight to
/// the pattern synthesizer.
#[derive(Debug)]
pub struct QueryClient {
    pub ai_provider: Option<Box<dyn AiProvider>>,
}

/// A builder for creating `QueryClient` instances.
#[derive(Default)]
pub struct QueryClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
}

impl QueryClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider used for the primary synthesis path.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn build(self) -> QueryClient {
        QueryClient {
            ai_provider: self.ai_provider,
        }
    }
}
