#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared mock providers and schema fixtures so the logic tests stay isolated
//! and repeatable.

use async_trait::async_trait;
use dbsage::providers::ai::AiProvider;
use dbsage::types::{ColumnDescription, SchemaDescription, TableDescription};
use std::sync::{Arc, RwLock};

// --- Mock AI Provider for Logic Testing ---

/// An AI provider that replays scripted responses and records every call.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
    pub responses: Arc<RwLock<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, dbsage::QueryError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        if let Some(response) = self.responses.write().unwrap().pop() {
            Ok(response)
        } else {
            Ok("Default mock response".to_string())
        }
    }
}

/// An AI provider that always fails, for exercising the fallback path.
#[derive(Clone, Debug)]
pub struct FailingAiProvider;

#[async_trait]
impl AiProvider for FailingAiProvider {
    async fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, dbsage::QueryError> {
        Err(dbsage::QueryError::AiApi(
            "simulated provider outage".to_string(),
        ))
    }
}

// --- Schema Fixtures ---

pub fn column(name: &str, data_type: &str) -> ColumnDescription {
    ColumnDescription {
        name: name.to_string(),
        data_type: data_type.to_string(),
        nullable: true,
        primary_key: false,
    }
}

pub fn pk_column(name: &str, data_type: &str) -> ColumnDescription {
    ColumnDescription {
        name: name.to_string(),
        data_type: data_type.to_string(),
        nullable: false,
        primary_key: true,
    }
}

pub fn table(name: &str, columns: Vec<ColumnDescription>) -> TableDescription {
    TableDescription {
        name: name.to_string(),
        columns,
        foreign_keys: Vec::new(),
        row_count: 0,
        sample_rows: Vec::new(),
    }
}

/// A small e-commerce schema: orders first, then customers and products.
pub fn commerce_schema() -> SchemaDescription {
    SchemaDescription {
        tables: vec![
            table(
                "orders",
                vec![
                    pk_column("id", "INTEGER"),
                    column("customer_id", "INTEGER"),
                    column("total_amount", "DECIMAL(10,2)"),
                    column("status", "varchar(32)"),
                ],
            ),
            table(
                "customers",
                vec![
                    pk_column("id", "INTEGER"),
                    column("name", "varchar(255)"),
                    column("email", "varchar(255)"),
                ],
            ),
            table(
                "products",
                vec![
                    pk_column("id", "INTEGER"),
                    column("title", "varchar(255)"),
                    column("price", "DECIMAL(10,2)"),
                ],
            ),
            table(
                "order_items",
                vec![
                    pk_column("id", "INTEGER"),
                    column("order_id", "INTEGER"),
                    column("quantity", "int(11)"),
                ],
            ),
        ],
    }
}

/// A schema where `total_amount` is the first numeric column of the first
/// table, for aggregate-dispatch assertions.
pub fn revenue_schema() -> SchemaDescription {
    SchemaDescription {
        tables: vec![table(
            "orders",
            vec![
                column("reference", "varchar(64)"),
                column("total_amount", "DECIMAL(10,2)"),
                column("placed_at", "TIMESTAMP"),
            ],
        )],
    }
}
