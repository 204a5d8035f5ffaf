use crate::errors::QueryError;
use crate::providers::db::storage::{QueryResult, Storage};
use crate::types::{ColumnDescription, ForeignKeyDescription, SchemaDescription, TableDescription};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow},
    Column, Row, TypeInfo, ValueRef,
};
use std::fmt::{self, Debug};
use tracing::{debug, info};

fn scan_err(e: sqlx::Error) -> QueryError {
    QueryError::SchemaIntrospection(e.to_string())
}

/// A provider for SQLite databases.
///
/// Holds a connection pool; cloning shares the same underlying pool.
#[derive(Clone)]
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    /// Connects to a SQLite database and verifies the connection.
    ///
    /// `url` accepts the usual sqlx forms, e.g. `sqlite::memory:` or
    /// `sqlite://path/to/db.sqlite?mode=rwc`.
    pub async fn connect(url: &str) -> Result<Self, QueryError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| QueryError::StorageConnection(e.to_string()))?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| QueryError::StorageConnection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// A helper for tests to pre-populate data by executing multiple SQL
    /// statements.
    pub async fn initialize_with_data(&self, init_sql: &str) -> Result<(), QueryError> {
        for statement in init_sql.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| QueryError::StorageQueryFailed(e.to_string()))?;
        }
        Ok(())
    }

    async fn sample_rows(
        &self,
        table: &str,
    ) -> Result<Vec<serde_json::Map<String, Value>>, QueryError> {
        let rows = sqlx::query(&format!("SELECT * FROM \"{table}\" LIMIT 5"))
            .fetch_all(&self.pool)
            .await
            .map_err(scan_err)?;
        Ok(rows_to_maps(rows_to_result(&rows)))
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

/// Decodes one SQLite column value into JSON.
///
/// SQLite coerces across storage classes on typed reads, so the dispatch has
/// to go by the value's actual storage class rather than trial decoding.
fn decode_value(row: &SqliteRow, idx: usize) -> Value {
    let Ok(raw) = row.try_get_raw(idx) else {
        return Value::Null;
    };
    if raw.is_null() {
        return Value::Null;
    }
    let storage_class = raw.type_info().name().to_string();

    match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<i64, _>(idx)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "REAL" => row
            .try_get::<f64, _>(idx)
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => Value::String("<blob>".to_string()),
        _ => row
            .try_get::<String, _>(idx)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}

fn rows_to_result(rows: &[SqliteRow]) -> QueryResult {
    let columns: Vec<String> = rows
        .first()
        .map(|r| r.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();

    let rows = rows
        .iter()
        .map(|row| {
            (0..row.columns().len())
                .map(|i| decode_value(row, i))
                .collect()
        })
        .collect();

    QueryResult { columns, rows }
}

fn rows_to_maps(result: QueryResult) -> Vec<serde_json::Map<String, Value>> {
    result
        .rows
        .into_iter()
        .map(|row| result.columns.iter().cloned().zip(row).collect())
        .collect()
}

#[async_trait]
impl Storage for SqliteProvider {
    fn name(&self) -> &str {
        "SQLite"
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult, QueryError> {
        debug!(query = %sql, "--> Executing SQLite query");

        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| QueryError::StorageQueryFailed(e.to_string()))?;

        Ok(rows_to_result(&rows))
    }

    async fn introspect(&self) -> Result<SchemaDescription, QueryError> {
        info!("Scanning SQLite schema");

        let table_rows = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(scan_err)?;

        let mut tables = Vec::new();

        for table_row in &table_rows {
            let name: String = table_row.try_get("name").map_err(scan_err)?;

            let column_rows = sqlx::query(&format!("PRAGMA table_info(\"{name}\")"))
                .fetch_all(&self.pool)
                .await
                .map_err(scan_err)?;

            let mut columns = Vec::new();
            for row in &column_rows {
                columns.push(ColumnDescription {
                    name: row.try_get("name").map_err(scan_err)?,
                    data_type: row.try_get("type").map_err(scan_err)?,
                    nullable: row.try_get::<i64, _>("notnull").map_err(scan_err)? == 0,
                    primary_key: row.try_get::<i64, _>("pk").map_err(scan_err)? > 0,
                });
            }

            let fk_rows = sqlx::query(&format!("PRAGMA foreign_key_list(\"{name}\")"))
                .fetch_all(&self.pool)
                .await
                .map_err(scan_err)?;

            let mut foreign_keys = Vec::new();
            for row in &fk_rows {
                // An implicit `REFERENCES t` leaves the target column NULL.
                let referenced_column: Option<String> = row.try_get("to").map_err(scan_err)?;
                foreign_keys.push(ForeignKeyDescription {
                    column: row.try_get("from").map_err(scan_err)?,
                    referenced_table: row.try_get("table").map_err(scan_err)?,
                    referenced_column: referenced_column.unwrap_or_default(),
                });
            }

            let row_count: i64 = sqlx::query(&format!("SELECT COUNT(*) FROM \"{name}\""))
                .fetch_one(&self.pool)
                .await
                .map_err(scan_err)?
                .try_get(0)
                .map_err(scan_err)?;

            let sample_rows = self.sample_rows(&name).await?;

            tables.push(TableDescription {
                name,
                columns,
                foreign_keys,
                row_count,
                sample_rows,
            });
        }

        info!(tables = tables.len(), "SQLite schema scan complete");
        Ok(SchemaDescription { tables })
    }
}
