//! # Query Validator Tests
//!
//! Exercises each mismatch check in isolation, compound scoring, and the
//! deliberate absence of a confidence floor.

use dbsage::validator::validate_query;

#[test]
fn test_clean_query_scores_full_confidence() {
    let report = validate_query("list all products", "SELECT * FROM products LIMIT 10");
    assert_eq!(report.confidence, 100);
    assert!(report.issues.is_empty());
    assert!(report.suggestions.is_empty());
}

#[test]
fn test_count_question_without_count_in_query() {
    let report = validate_query("how many users signed up", "SELECT * FROM users");
    assert_eq!(report.confidence, 70);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.suggestions.len(), 1);
}

#[test]
fn test_count_question_with_count_is_clean() {
    let report = validate_query("how many users", "SELECT COUNT(*) as count FROM users");
    assert_eq!(report.confidence, 100);
    assert!(report.issues.is_empty());
}

#[test]
fn test_aggregate_question_without_aggregate_function() {
    let report = validate_query("total revenue", "SELECT * FROM orders");
    assert_eq!(report.confidence, 80);
    assert_eq!(report.issues.len(), 1);
    // The aggregate check carries no suggestion.
    assert!(report.suggestions.is_empty());
}

#[test]
fn test_count_satisfies_aggregate_check() {
    let report = validate_query("total count of orders", "SELECT COUNT(*) FROM orders");
    assert_eq!(report.confidence, 100);
    assert!(report.issues.is_empty());
}

#[test]
fn test_grouping_question_without_group_by() {
    let report = validate_query(
        "revenue by each region",
        "SELECT region, SUM(amount) FROM sales",
    );
    assert_eq!(report.confidence, 85);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.suggestions.len(), 1);
}

#[test]
fn test_top_n_without_limit_embeds_n_in_suggestion() {
    let report = validate_query("show me top 5 customers", "SELECT * FROM customers");
    assert_eq!(report.confidence, 80);
    assert_eq!(report.issues.len(), 1);
    assert!(report.suggestions[0].contains("LIMIT 5"));
}

#[test]
fn test_top_n_with_limit_is_clean() {
    let report = validate_query(
        "top 10 products",
        "SELECT * FROM products ORDER BY sales DESC LIMIT 10",
    );
    assert_eq!(report.confidence, 100);
    assert!(report.issues.is_empty());
}

#[test]
fn test_time_question_without_where() {
    let report = validate_query("orders from last week", "SELECT * FROM orders");
    assert_eq!(report.confidence, 75);
    assert_eq!(report.issues.len(), 1);
}

#[test]
fn test_compound_mismatches_accumulate() {
    let report = validate_query("how many orders were placed today", "SELECT * FROM orders");
    // Missing COUNT (-30) and missing WHERE for "today" (-25).
    assert_eq!(report.confidence, 45);
    assert_eq!(report.issues.len(), 2);
}

#[test]
fn test_confidence_has_no_floor() {
    let report = validate_query(
        "how many total sales by each region for the top 3 today",
        "SELECT name FROM sales",
    );
    // All five checks fire: 100 - (30 + 20 + 15 + 20 + 25).
    assert_eq!(report.confidence, -10);
    assert_eq!(report.issues.len(), 5);
    assert_eq!(report.suggestions.len(), 3);
}

#[test]
fn test_validation_is_idempotent() {
    let first = validate_query("how many orders were placed today", "SELECT * FROM orders");
    let second = validate_query("how many orders were placed today", "SELECT * FROM orders");
    assert_eq!(first, second);
}
