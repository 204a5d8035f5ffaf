//! # Query Generation Orchestration Tests
//!
//! Validates the AI-first/pattern-fallback control flow of `QueryClient`,
//! response post-processing, and that the validator always runs.

mod common;

use common::{commerce_schema, FailingAiProvider, MockAiProvider};
use dbsage::{
    GenerationMethod, QueryClientBuilder, QueryError, SchemaDescription, TableDocumentation,
};
use std::collections::HashMap;

#[tokio::test]
async fn test_ai_path_strips_sql_fences() {
    let mock_ai = MockAiProvider::new(vec![
        "```sql\nSELECT name FROM customers WHERE id = 1\n```".to_string()
    ]);
    let client = QueryClientBuilder::new()
        .ai_provider(Box::new(mock_ai.clone()))
        .build();

    let result = client
        .generate_query("who is customer 1", &commerce_schema(), &HashMap::new())
        .await
        .expect("generation failed");

    assert_eq!(result.query, "SELECT name FROM customers WHERE id = 1");
    assert_eq!(result.method, GenerationMethod::Ai);
    assert_eq!(mock_ai.call_history.read().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ai_path_strips_plain_fences() {
    let mock_ai = MockAiProvider::new(vec!["```\nSELECT * FROM products\n```".to_string()]);
    let client = QueryClientBuilder::new()
        .ai_provider(Box::new(mock_ai))
        .build();

    let result = client
        .generate_query("show products", &commerce_schema(), &HashMap::new())
        .await
        .expect("generation failed");

    assert_eq!(result.query, "SELECT * FROM products");
}

#[tokio::test]
async fn test_prompt_embeds_schema_and_documentation() {
    let mock_ai = MockAiProvider::new(vec!["SELECT * FROM orders".to_string()]);
    let mut documentation = HashMap::new();
    documentation.insert(
        "orders".to_string(),
        TableDocumentation {
            description: Some("All customer orders".to_string()),
            columns: HashMap::new(),
        },
    );

    let client = QueryClientBuilder::new()
        .ai_provider(Box::new(mock_ai.clone()))
        .build();
    client
        .generate_query("show orders", &commerce_schema(), &documentation)
        .await
        .expect("generation failed");

    let history = mock_ai.call_history.read().unwrap();
    let (_, user_prompt) = &history[0];
    assert!(user_prompt.contains("TABLE: orders"));
    assert!(user_prompt.contains("Description: All customer orders"));
    assert!(user_prompt.contains("- id: INTEGER (PRIMARY KEY)"));
    assert!(user_prompt.contains("USER QUESTION: show orders"));
}

#[tokio::test]
async fn test_ai_failure_falls_back_to_pattern() {
    let client = QueryClientBuilder::new()
        .ai_provider(Box::new(FailingAiProvider))
        .build();

    let result = client
        .generate_query("how many orders", &commerce_schema(), &HashMap::new())
        .await
        .expect("generation failed");

    assert_eq!(result.method, GenerationMethod::Pattern);
    assert_eq!(result.query, "SELECT COUNT(*) as count FROM orders");
}

#[tokio::test]
async fn test_no_provider_uses_pattern_path() {
    let client = QueryClientBuilder::new().build();

    let result = client
        .generate_query("list all products", &commerce_schema(), &HashMap::new())
        .await
        .expect("generation failed");

    assert_eq!(result.method, GenerationMethod::Pattern);
    assert_eq!(result.query, "SELECT * FROM products LIMIT 10");
    assert_eq!(result.validation.confidence, 100);
}

#[tokio::test]
async fn test_empty_question_is_rejected() {
    let client = QueryClientBuilder::new().build();

    let err = client
        .generate_query("   ", &commerce_schema(), &HashMap::new())
        .await
        .expect_err("empty question must fail");

    assert!(matches!(err, QueryError::EmptyQuestion));
}

#[tokio::test]
async fn test_empty_schema_yields_no_query() {
    let client = QueryClientBuilder::new().build();

    let err = client
        .generate_query("how many rows", &SchemaDescription::default(), &HashMap::new())
        .await
        .expect_err("empty schema must fail");

    assert!(matches!(err, QueryError::NoQueryGenerated));
}

#[tokio::test]
async fn test_validator_runs_on_ai_queries() {
    let mock_ai = MockAiProvider::new(vec!["SELECT * FROM orders".to_string()]);
    let client = QueryClientBuilder::new()
        .ai_provider(Box::new(mock_ai))
        .build();

    let result = client
        .generate_query("how many orders", &commerce_schema(), &HashMap::new())
        .await
        .expect("generation failed");

    assert_eq!(result.method, GenerationMethod::Ai);
    assert_eq!(result.validation.confidence, 70);
    assert_eq!(result.validation.issues.len(), 1);
}
