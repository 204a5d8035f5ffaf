//! # Prompt Templates
//!
//! Default prompts for the AI synthesis path, plus the schema-context
//! serializer that embeds the live schema (and any human-authored table
//! documentation) into the user prompt.

use crate::types::{SchemaDescription, TableDocumentation};
use std::collections::HashMap;

/// The system prompt for the query generation stage.
pub const QUERY_GENERATION_SYSTEM_PROMPT: &str = "You are a SQL query generator. Given a database schema and a natural language question, write a single valid SQL SELECT query that answers the question. Expected output is the SQL query only.";

/// The user prompt template for the query generation stage.
///
/// Placeholders: `{context}`, `{question}`
pub const QUERY_GENERATION_USER_PROMPT: &str = r#"DATABASE SCHEMA:
{context}

USER QUESTION: {question}

IMPORTANT RULES:
1. Only generate SELECT queries
2. Use proper SQL syntax
3. Return ONLY the SQL query, no explanations
4. If the question cannot be answered with the schema, return a query that gets the closest relevant data

SQL QUERY:"#;

/// Serializes the schema into the compact textual form embedded in prompts.
///
/// Per table: a `TABLE:` header, the human-authored description if one exists,
/// each column with its native type and a PRIMARY KEY marker, and the foreign
/// key targets.
pub fn build_schema_context(
    schema: &SchemaDescription,
    documentation: &HashMap<String, TableDocumentation>,
) -> String {
    let mut lines = Vec::new();

    for table in &schema.tables {
        let table_doc = documentation.get(&table.name);

        lines.push(format!("TABLE: {}", table.name));
        if let Some(description) = table_doc.and_then(|d| d.description.as_deref()) {
            if !description.is_empty() {
                lines.push(format!("  Description: {description}"));
            }
        }

        lines.push("  COLUMNS:".to_string());
        for column in &table.columns {
            let pk = if column.primary_key {
                " (PRIMARY KEY)"
            } else {
                ""
            };
            let mut line = format!("    - {}: {}{pk}", column.name, column.data_type);
            if let Some(doc) = table_doc.and_then(|d| d.columns.get(&column.name)) {
                line.push_str(&format!(" -- {doc}"));
            }
            lines.push(line);
        }

        if !table.foreign_keys.is_empty() {
            lines.push("  FOREIGN KEYS:".to_string());
            for fk in &table.foreign_keys {
                lines.push(format!(
                    "    - {} -> {}({})",
                    fk.column, fk.referenced_table, fk.referenced_column
                ));
            }
        }

        lines.push(String::new());
    }

    lines.join("\n")
}
