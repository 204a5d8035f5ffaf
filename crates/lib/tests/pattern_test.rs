//! # Pattern Synthesizer Tests
//!
//! Validates table selection, numeric-column detection, and the fixed intent
//! priority of the deterministic fallback synthesizer.

mod common;

use common::{column, commerce_schema, revenue_schema, table};
use dbsage::pattern::{generate_pattern_query, is_numeric_type};
use dbsage::types::SchemaDescription;

#[test]
fn test_count_intent_on_mentioned_table() {
    let query = generate_pattern_query("how many customers do we have", &commerce_schema());
    assert_eq!(query.as_deref(), Some("SELECT COUNT(*) as count FROM customers"));
}

#[test]
fn test_count_beats_total_in_priority() {
    // "count" and "total" both present: the count intent wins.
    let query = generate_pattern_query("count of total sales", &commerce_schema());
    assert_eq!(query.as_deref(), Some("SELECT COUNT(*) as count FROM orders"));
}

#[test]
fn test_sum_uses_first_numeric_column() {
    let query = generate_pattern_query("what is the total revenue", &revenue_schema());
    assert_eq!(
        query.as_deref(),
        Some("SELECT SUM(total_amount) as total FROM orders")
    );
}

#[test]
fn test_average_uses_first_numeric_column() {
    let query = generate_pattern_query("what is the average order value", &revenue_schema());
    assert_eq!(
        query.as_deref(),
        Some("SELECT AVG(total_amount) as average FROM orders")
    );
}

#[test]
fn test_total_without_numeric_column_falls_to_default() {
    let schema = SchemaDescription {
        tables: vec![table(
            "notes",
            vec![column("title", "TEXT"), column("body", "TEXT")],
        )],
    };
    let query = generate_pattern_query("total spend", &schema);
    assert_eq!(query.as_deref(), Some("SELECT * FROM notes LIMIT 10"));
}

#[test]
fn test_default_limited_select() {
    let query = generate_pattern_query("list all products", &commerce_schema());
    assert_eq!(query.as_deref(), Some("SELECT * FROM products LIMIT 10"));
}

#[test]
fn test_underscored_table_matches_spaced_form() {
    let query = generate_pattern_query("show me order items", &commerce_schema());
    assert_eq!(query.as_deref(), Some("SELECT * FROM order_items LIMIT 10"));
}

#[test]
fn test_unknown_table_falls_back_to_first() {
    let query = generate_pattern_query("show me everything about penguins", &commerce_schema());
    assert_eq!(query.as_deref(), Some("SELECT * FROM orders LIMIT 10"));
}

#[test]
fn test_empty_schema_yields_none() {
    let schema = SchemaDescription::default();
    assert_eq!(generate_pattern_query("how many rows", &schema), None);
}

#[test]
fn test_numeric_type_detection() {
    assert!(is_numeric_type("INTEGER"));
    assert!(is_numeric_type("int(11)"));
    assert!(is_numeric_type("DECIMAL(10,2)"));
    assert!(is_numeric_type("double precision"));
    assert!(is_numeric_type("BIGINT"));
    assert!(!is_numeric_type("varchar(255)"));
    assert!(!is_numeric_type("TEXT"));
    // The substring test is deliberately permissive.
    assert!(is_numeric_type("varint"));
}
