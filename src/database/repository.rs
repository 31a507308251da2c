use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::User;
use crate::config::is_valid_table_name;

/// Data access for the user table.
///
/// Implementations are shared across request tasks, so every method takes
/// `&self` and must be safe to call concurrently.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return the stored row, including its assigned id.
    async fn insert(&self, user: &User) -> Result<User, DatabaseError>;

    async fn find_by_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError>;

    async fn list(&self) -> Result<Vec<User>, DatabaseError>;

    /// Overwrite email and password of the user named `user.user_name`.
    /// Returns `None` when no such user exists.
    async fn update_credentials(&self, user: &User) -> Result<Option<User>, DatabaseError>;

    /// Returns the number of rows removed.
    async fn delete_by_name(&self, user_name: &str) -> Result<u64, DatabaseError>;

    async fn delete_all(&self) -> Result<(), DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// PostgreSQL-backed user store. All values are bound as parameters; only
/// the validated, quoted table name is formatted into statements.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
    table: String,
    log_queries: bool,
}

const USER_COLUMNS: &str =
    "ID AS id, UserName AS username, COALESCE(email, '') AS email, COALESCE(password, '') AS password";

impl PgUserStore {
    pub fn new(pool: PgPool, table_name: &str) -> Result<Self, DatabaseError> {
        if !is_valid_table_name(table_name) {
            return Err(DatabaseError::InvalidTableName(table_name.to_string()));
        }
        Ok(Self {
            pool,
            table: DatabaseManager::quote_identifier(table_name),
            log_queries: false,
        })
    }

    pub fn with_query_logging(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    fn sql(&self, sql: String) -> String {
        if self.log_queries {
            debug!("query: {}", sql);
        }
        sql
    }

    fn map_insert_error(err: sqlx::Error, user_name: &str) -> DatabaseError {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DatabaseError::DuplicateUser(user_name.to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &User) -> Result<User, DatabaseError> {
        let sql = self.sql(format!(
            "INSERT INTO {} (UserName, email, password) VALUES ($1, $2, $3) RETURNING {}",
            self.table, USER_COLUMNS
        ));

        sqlx::query_as::<_, User>(&sql)
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::map_insert_error(e, &user.user_name))
    }

    async fn find_by_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let sql = self.sql(format!(
            "SELECT {} FROM {} WHERE UserName = $1",
            USER_COLUMNS, self.table
        ));

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = self.sql(format!("SELECT {} FROM {} ORDER BY ID", USER_COLUMNS, self.table));

        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn update_credentials(&self, user: &User) -> Result<Option<User>, DatabaseError> {
        let sql = self.sql(format!(
            "UPDATE {} SET email = $1, password = $2 WHERE UserName = $3 RETURNING {}",
            self.table, USER_COLUMNS
        ));

        let mut rows = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.user_name)
            .fetch_all(&self.pool)
            .await?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(DatabaseError::QueryError(format!(
                "key error updating user '{}', {} instances updated",
                user.user_name, n
            ))),
        }
    }

    async fn delete_by_name(&self, user_name: &str) -> Result<u64, DatabaseError> {
        let sql = self.sql(format!("DELETE FROM {} WHERE UserName = $1", self.table));

        let result = sqlx::query(&sql).bind(user_name).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<(), DatabaseError> {
        let sql = self.sql(format!("TRUNCATE TABLE {} RESTART IDENTITY", self.table));

        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
