use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{is_valid_table_name, DatabaseConfig};

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connection pool setup and table bootstrap for the user table
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the connection pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        info!("Opening database pool for {}", Self::redact_url(url)?);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        Ok(pool)
    }

    /// Create the user table if it does not exist yet.
    ///
    /// Returns `true` when the table had to be created.
    pub async fn ensure_table(pool: &PgPool, table_name: &str) -> Result<bool, DatabaseError> {
        if !is_valid_table_name(table_name) {
            return Err(DatabaseError::InvalidTableName(table_name.to_string()));
        }

        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_schema = current_schema() AND table_name = $1)",
        )
        .bind(table_name)
        .fetch_one(pool)
        .await?;

        if exists {
            info!("Table '{}' found", table_name);
            return Ok(false);
        }

        warn!("Table '{}' not found, will create", table_name);
        sqlx::query(&Self::create_table_sql(table_name)).execute(pool).await?;
        info!("Table '{}' created", table_name);
        Ok(true)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Close the pool on shutdown
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }

    fn create_table_sql(table_name: &str) -> String {
        format!(
            "CREATE TABLE {} (\
             ID SERIAL PRIMARY KEY, \
             UserName VARCHAR(255) NOT NULL UNIQUE, \
             email VARCHAR(255), \
             password VARCHAR(255))",
            Self::quote_identifier(table_name)
        )
    }

    /// Quote SQL identifier to prevent injection
    pub fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Connection URL with the password stripped, for log lines
    fn redact_url(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
