//! In-process user store
//!
//! Mirrors the PostgreSQL table semantics: unique user names, ids assigned
//! from 1 upwards in insertion order, and id numbering restarted by
//! `delete_all`. Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::User;
use super::repository::UserStore;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<User>,
    next_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<Table>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> Result<User, DatabaseError> {
        let mut table = self.table.write().await;
        if table.rows.iter().any(|u| u.user_name == user.user_name) {
            return Err(DatabaseError::DuplicateUser(user.user_name.clone()));
        }

        table.next_id += 1;
        let stored = User {
            id: table.next_id,
            ..user.clone()
        };
        table.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn update_credentials(&self, user: &User) -> Result<Option<User>, DatabaseError> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.iter_mut().find(|u| u.user_name == user.user_name) else {
            return Ok(None);
        };

        row.email = user.email.clone();
        row.password = user.password.clone();
        Ok(Some(row.clone()))
    }

    async fn delete_by_name(&self, user_name: &str) -> Result<u64, DatabaseError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|u| u.user_name != user_name);
        Ok((before - table.rows.len()) as u64)
    }

    async fn delete_all(&self) -> Result<(), DatabaseError> {
        let mut table = self.table.write().await;
        table.rows.clear();
        table.next_id = 0;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
