//! # Query Validator
//!
//! Re-examines a natural-language question against the produced SQL text and
//! emits a confidence score plus detected mismatches and suggested fixes. Runs
//! on every generated query regardless of which synthesizer produced it.
//!
//! The checks are independent and cumulative: one input can trigger all of
//! them, and confidence is never clamped, so it can go below zero.

use crate::types::ValidationReport;
use regex::Regex;

const AGGREGATE_WORDS: [&str; 8] = [
    "total", "sum", "average", "avg", "minimum", "min", "maximum", "max",
];

const TIME_WORDS: [&str; 6] = [
    "today",
    "yesterday",
    "last week",
    "last month",
    "this year",
    "recent",
];

/// Scores how well a generated query matches the question's apparent intent.
///
/// Pure and deterministic: identical inputs always yield an identical report,
/// and the query under inspection is never mutated.
pub fn validate_query(question: &str, query: &str) -> ValidationReport {
    let question = question.to_lowercase();
    let sql = query.to_uppercase();

    let mut confidence: i32 = 100;
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if (question.contains("how many") || question.contains("count")) && !sql.contains("COUNT") {
        confidence -= 30;
        issues.push("Question asks for a count but the query does not use COUNT".to_string());
        suggestions.push("Use SELECT COUNT(*) to count matching rows".to_string());
    }

    if AGGREGATE_WORDS.iter().any(|w| question.contains(w))
        && !["SUM(", "AVG(", "MIN(", "MAX("]
            .iter()
            .any(|f| sql.contains(f))
        && !sql.contains("COUNT")
    {
        confidence -= 20;
        issues.push(
            "Question asks for an aggregated value but the query has no aggregate function"
                .to_string(),
        );
    }

    if question.contains("by") && question.contains("each") && !sql.contains("GROUP BY") {
        confidence -= 15;
        issues.push("Question implies grouping but the query has no GROUP BY".to_string());
        suggestions.push("Add a GROUP BY clause on the grouping column".to_string());
    }

    // The pattern is static, so compilation cannot fail; the validator must
    // never error, so a failure just skips the check.
    if let Ok(top_n) = Regex::new(r"top\s+(\d+)") {
        if let Some(caps) = top_n.captures(&question) {
            if !sql.contains("LIMIT") {
                confidence -= 20;
                let n = &caps[1];
                issues.push(format!(
                    "Question asks for the top {n} results but the query has no LIMIT"
                ));
                suggestions.push(format!("Add LIMIT {n} to restrict the result count"));
            }
        }
    }

    if TIME_WORDS.iter().any(|w| question.contains(w)) && !sql.contains("WHERE") {
        confidence -= 25;
        issues.push("Question mentions a time period but the query has no WHERE filter".to_string());
    }

    ValidationReport {
        confidence,
        issues,
        suggestions,
    }
}
