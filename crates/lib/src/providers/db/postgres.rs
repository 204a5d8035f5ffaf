use crate::errors::QueryError;
use crate::providers::db::storage::{QueryResult, Storage};
use crate::types::{ColumnDescription, ForeignKeyDescription, SchemaDescription, TableDescription};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    postgres::{PgPool, PgPoolOptions, PgRow},
    Column, Row,
};
use std::fmt::{self, Debug};
use tracing::{debug, info};

fn scan_err(e: sqlx::Error) -> QueryError {
    QueryError::SchemaIntrospection(e.to_string())
}

/// A provider for PostgreSQL databases. Scans are scoped to the `public`
/// schema; system catalogs are never reported.
#[derive(Clone)]
pub struct PostgresProvider {
    pool: PgPool,
}

impl PostgresProvider {
    /// Connects to a PostgreSQL database and verifies the connection.
    pub async fn connect(url: &str) -> Result<Self, QueryError> {
        let pool = PgPoolOptions::new()
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

impl Debug for PostgresProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresProvider").finish_non_exhaustive()
    }
}

/// Decodes one PostgreSQL column value into JSON.
fn decode_value(row: &PgRow, idx: usize) -> Value {
    if let Ok(v) = row.try_get::<i64, _>(idx) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<i32, _>(idx) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<i16, _>(idx) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<f64, _>(idx) {
        return serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<f32, _>(idx) {
        return serde_json::Number::from_f64(v as f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<String, _>(idx) {
        return Value::String(v);
    }
    if let Ok(v) = row.try_get::<bool, _>(idx) {
        return Value::Bool(v);
    }
    Value::Null
}

fn rows_to_result(rows: &[PgRow]) -> QueryResult {
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
impl Storage for PostgresProvider {
    fn name(&self) -> &str {
        "PostgreSQL"
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult, QueryError> {
        debug!(query = %sql, "--> Executing PostgreSQL query");

        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| QueryError::StorageQueryFailed(e.to_string()))?;

        Ok(rows_to_result(&rows))
    }

    async fn introspect(&self) -> Result<SchemaDescription, QueryError> {
        info!("Scanning PostgreSQL schema");

        let table_rows = sqlx::query(
            "SELECT table_name FROM information_schema.tables
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE'
             ORDER BY table_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(scan_err)?;

        let mut tables = Vec::new();

        for table_row in &table_rows {
            let name: String = table_row.try_get("table_name").map_err(scan_err)?;

            let pk_rows = sqlx::query(
                "SELECT kcu.column_name FROM information_schema.table_constraints tc
                 JOIN information_schema.key_column_usage kcu
                   ON tc.constraint_name = kcu.constraint_name
                  AND tc.table_schema = kcu.table_schema
                 WHERE tc.constraint_type = 'PRIMARY KEY'
                   AND tc.table_schema = 'public' AND tc.table_name = $1",
            )
            .bind(&name)
            .fetch_all(&self.pool)
            .await
            .map_err(scan_err)?;

            let mut pk_columns = Vec::new();
            for row in &pk_rows {
                pk_columns.push(row.try_get::<String, _>("column_name").map_err(scan_err)?);
            }

            let column_rows = sqlx::query(
                "SELECT column_name, data_type, is_nullable
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1
                 ORDER BY ordinal_position",
            )
            .bind(&name)
            .fetch_all(&self.pool)
            .await
            .map_err(scan_err)?;

            let mut columns = Vec::new();
            for row in &column_rows {
                let column_name: String = row.try_get("column_name").map_err(scan_err)?;
                let is_nullable: String = row.try_get("is_nullable").map_err(scan_err)?;
                columns.push(ColumnDescription {
                    primary_key: pk_columns.contains(&column_name),
                    name: column_name,
                    data_type: row.try_get("data_type").map_err(scan_err)?,
                    nullable: is_nullable == "YES",
                });
            }

            let fk_rows = sqlx::query(
                "SELECT kcu.column_name,
                        ccu.table_name AS referenced_table,
                        ccu.column_name AS referenced_column
                 FROM information_schema.table_constraints tc
                 JOIN information_schema.key_column_usage kcu
                   ON tc.constraint_name = kcu.constraint_name
                  AND tc.table_schema = kcu.table_schema
                 JOIN information_schema.constraint_column_usage ccu
                   ON tc.constraint_name = ccu.constraint_name
                  AND tc.table_schema = ccu.table_schema
                 WHERE tc.constraint_type = 'FOREIGN KEY'
                   AND tc.table_schema = 'public' AND tc.table_name = $1",
            )
            .bind(&name)
            .fetch_all(&self.pool)
            .await
            .map_err(scan_err)?;

            let mut foreign_keys = Vec::new();
            for row in &fk_rows {
                foreign_keys.push(ForeignKeyDescription {
                    column: row.try_get("column_name").map_err(scan_err)?,
                    referenced_table: row.try_get("referenced_table").map_err(scan_err)?,
                    referenced_column: row.try_get("referenced_column").map_err(scan_err)?,
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

        info!(tables = tables.len(), "PostgreSQL schema scan complete");
        Ok(SchemaDescription { tables })
    }
}
