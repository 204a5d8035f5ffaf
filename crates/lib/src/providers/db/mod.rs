pub mod mysql;
pub mod postgres;
pub mod sqlite;
pub mod storage;

use crate::errors::QueryError;
use storage::Storage;

pub use mysql::MySqlProvider;
pub use postgres::PostgresProvider;
pub use sqlite::SqliteProvider;

/// A supported SQL database variant with distinct introspection syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
    Mysql,
}

impl Dialect {
    /// Infers the dialect from a connection string's scheme.
    pub fn from_url(url: &str) -> Result<Self, QueryError> {
        let scheme = url.split(':').next().unwrap_or_default().to_lowercase();
        match scheme.as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            _ => Err(QueryError::UnsupportedDialect(url.to_string())),
        }
    }
}

/// Connects to a database, dispatching on the connection string's dialect.
///
/// The connection is verified with a `SELECT 1` before being handed out.
pub async fn connect(url: &str) -> Result<Box<dyn Storage>, QueryError> {
    match Dialect::from_url(url)? {
        Dialect::Sqlite => Ok(Box::new(SqliteProvider::connect(url).await?)),
        Dialect::Postgres => Ok(Box::new(PostgresProvider::connect(url).await?)),
        Dialect::Mysql => Ok(Box::new(MySqlProvider::connect(url).await?)),
    }
}
