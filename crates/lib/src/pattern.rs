//! # Pattern-Based Query Synthesizer
//!
//! A deterministic fallback that maps a natural-language question to a single
//! SQL statement using keyword heuristics and the normalized schema. It has no
//! external dependency and always produces a SELECT by construction. It is a
//! best-effort fallback, not a natural-language compiler: no joins, filtering,
//! grouping, or ordering.

use crate::types::{SchemaDescription, TableDescription};

/// Type substrings that mark a column as numeric.
///
/// This is a substring test, not a type-system check. It is deliberately
/// permissive and can produce false positives (e.g. "varint" matches "int").
const NUMERIC_TYPE_MARKERS: [&str; 9] = [
    "int", "integer", "decimal", "numeric", "float", "double", "real", "bigint", "smallint",
];

/// Returns true if a dialect-native type string looks numeric.
///
/// Exposed so a real type classifier can replace it without touching the
/// synthesizer's dispatch logic.
pub fn is_numeric_type(data_type: &str) -> bool {
    let data_type = data_type.to_lowercase();
    NUMERIC_TYPE_MARKERS.iter().any(|m| data_type.contains(m))
}

/// Picks the first table whose name appears in the question, matching either
/// the verbatim name or its underscores-as-spaces form. Falls back to the
/// first table in the schema.
fn select_table<'a>(question: &str, schema: &'a SchemaDescription) -> Option<&'a TableDescription> {
    schema
        .tables
        .iter()
        .find(|t| {
            let name = t.name.to_lowercase();
            question.contains(&name) || question.contains(&name.replace('_', " "))
        })
        .or_else(|| schema.tables.first())
}

/// Generates a SQL query from a question using keyword heuristics.
///
/// Intent dispatch is a fixed priority list; the first match wins and there is
/// no combination logic. Returns `None` only when the schema has zero tables.
pub fn generate_pattern_query(question: &str, schema: &SchemaDescription) -> Option<String> {
    let question = question.to_lowercase();
    let table = select_table(&question, schema)?;

    let first_numeric = table.columns.iter().find(|c| is_numeric_type(&c.data_type));

    if question.contains("how many") || question.contains("count") {
        return Some(format!("SELECT COUNT(*) as count FROM {}", table.name));
    }

    if question.contains("total") || question.contains("sum") {
        if let Some(column) = first_numeric {
            return Some(format!(
                "SELECT SUM({}) as total FROM {}",
                column.name, table.name
            ));
        }
    }

    if question.contains("average") || question.contains("avg") {
        if let Some(column) = first_numeric {
            return Some(format!(
                "SELECT AVG({}) as average FROM {}",
                column.name, table.name
            ));
        }
    }

    Some(format!("SELECT * FROM {} LIMIT 10", table.name))
}
