//! # Natural Language to SQL
//!
//! This crate turns natural-language questions about a connected SQL database
//! into SELECT queries. It tries a configurable AI provider first, falls back
//! to a deterministic pattern synthesizer, and scores every generated query
//! with a heuristic validator.

pub mod errors;
pub mod pattern;
pub mod prompts;
pub mod providers;
pub mod types;
pub mod validator;

pub use errors::QueryError;
pub use types::{
    ColumnDescription, ForeignKeyDescription, GenerationMethod, QueryClient, QueryClientBuilder,
    QueryGenerationResult, SchemaDescription, TableDescription, TableDocumentation,
    ValidationReport,
};

use prompts::{QUERY_GENERATION_SYSTEM_PROMPT, QUERY_GENERATION_USER_PROMPT};
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, info, warn};

impl QueryClient {
    /// Generates a SQL query for a natural-language question.
    ///
    /// The AI path is attempted first when a provider is configured; any
    /// failure or empty response falls back to the pattern synthesizer. The
    /// validator runs on the final query regardless of which path produced
    /// it. Fails with `NoQueryGenerated` only when both paths decline, which
    /// is possible only for a schema with zero tables.
    pub async fn generate_query(
        &self,
        question: &str,
        schema: &SchemaDescription,
        documentation: &HashMap<String, TableDocumentation>,
    ) -> Result<QueryGenerationResult, QueryError> {
        if question.trim().is_empty() {
            return Err(QueryError::EmptyQuestion);
        }

        info!("[generate_query] received question: {question:?}");

        let (query, method) = match self.synthesize_with_ai(question, schema, documentation).await
        {
            Some(query) => (query, GenerationMethod::Ai),
            None => match pattern::generate_pattern_query(question, schema) {
                Some(query) => (query, GenerationMethod::Pattern),
                None => return Err(QueryError::NoQueryGenerated),
            },
        };

        let validation = validator::validate_query(question, &query);
        debug!(
            confidence = validation.confidence,
            method = ?method,
            "Generated query: {query}"
        );

        Ok(QueryGenerationResult {
            query,
            method,
            validation,
        })
    }

    /// Asks the configured AI provider for a query.
    ///
    /// Every provider error is absorbed here and logged; the caller only sees
    /// `None`, which always triggers the pattern fallback. The raw response is
    /// stripped of surrounding markdown code fences and whitespace.
    async fn synthesize_with_ai(
        &self,
        question: &str,
        schema: &SchemaDescription,
        documentation: &HashMap<String, TableDocumentation>,
    ) -> Option<String> {
        let ai_provider = self.ai_provider.as_ref()?;

        let context = prompts::build_schema_context(schema, documentation);
        let user_prompt = QUERY_GENERATION_USER_PROMPT
            .replace("{context}", &context)
            .replace("{question}", question);

        debug!(system_prompt = %QUERY_GENERATION_SYSTEM_PROMPT, user_prompt = %user_prompt, "--> Sending prompts to AI provider");

        let raw_response = match ai_provider
            .generate(QUERY_GENERATION_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("AI synthesis failed, falling back to pattern generation: {e}");
                return None;
            }
        };

        debug!("<-- Query from AI: {}", &raw_response);

        // Extract the query from markdown code blocks if the model added them.
        let query = match Regex::new(r"```(?:sql)?\n?([\s\S]*?)```") {
            Ok(re) => re
                .captures(&raw_response)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_else(|| raw_response.trim().to_string()),
            Err(_) => raw_response.trim().to_string(),
        };

        if query.is_empty() {
            warn!("AI provider returned an empty query, falling back to pattern generation");
            return None;
        }

        Some(query)
    }
}
