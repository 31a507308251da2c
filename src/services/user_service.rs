use std::sync::Arc;
use tracing::{info, warn};

use super::status::{ModelOutcome, ModelStatus};
use crate::database::{DatabaseError, User, UserStore};

/// Check that a record carries every required field. The first empty field,
/// in the order user name, email, password, decides the reason.
pub fn validate_user(user: &User) -> Result<(), &'static str> {
    if user.user_name.is_empty() {
        Err("empty user name")
    } else if user.email.is_empty() {
        Err("invalid email")
    } else if user.password.is_empty() {
        Err("invalid password")
    } else {
        Ok(())
    }
}

/// User operations over an injected store. Every call yields a
/// `ModelOutcome`; storage errors become the operation's failure kind.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.store.ping().await
    }

    pub async fn create_user(&self, new_user: User) -> ModelOutcome<User> {
        if let Err(reason) = validate_user(&new_user) {
            return ModelOutcome::failure(new_user, ModelStatus::CreateFailure, reason);
        }

        match self.store.insert(&new_user).await {
            Ok(stored) => {
                info!("created user '{}' with id {}", stored.user_name, stored.id);
                ModelOutcome::success(stored)
            }
            Err(DatabaseError::DuplicateUser(name)) => ModelOutcome::failure(
                new_user,
                ModelStatus::CreateFailure,
                format!("user '{}' already exists", name),
            ),
            Err(e) => {
                warn!("insert failed for user '{}': {}", new_user.user_name, e);
                let reason = format!("failed to insert user '{}': {}", new_user.user_name, e);
                ModelOutcome::failure(new_user, ModelStatus::CreateFailure, reason)
            }
        }
    }

    pub async fn get_user(&self, user_name: &str) -> ModelOutcome<User> {
        if user_name.is_empty() {
            return ModelOutcome::failure(User::default(), ModelStatus::GetFailure, "User name not supplied");
        }

        match self.store.find_by_name(user_name).await {
            Ok(Some(user)) => ModelOutcome::success(user),
            Ok(None) => ModelOutcome::failure(
                User::default(),
                ModelStatus::NotFound,
                format!("failed to retrieve record for user '{}': user not found", user_name),
            ),
            Err(e) => {
                warn!("lookup failed for user '{}': {}", user_name, e);
                ModelOutcome::failure(
                    User::default(),
                    ModelStatus::GetFailure,
                    format!("error retrieving record for user '{}': {}", user_name, e),
                )
            }
        }
    }

    pub async fn get_all_users(&self) -> ModelOutcome<Vec<User>> {
        match self.store.list().await {
            Ok(users) => ModelOutcome::success(users),
            Err(e) => {
                warn!("listing users failed: {}", e);
                ModelOutcome::failure(
                    Vec::new(),
                    ModelStatus::GetFailure,
                    format!("failed to retrieve records: {}", e),
                )
            }
        }
    }

    /// Replace email and password of an existing user. The user name selects
    /// the record and is never changed.
    pub async fn update_user(&self, user: User) -> ModelOutcome<User> {
        if let Err(reason) = validate_user(&user) {
            return ModelOutcome::failure(user, ModelStatus::UpdateFailure, reason);
        }

        match self.store.update_credentials(&user).await {
            Ok(Some(updated)) => {
                info!("updated user '{}'", updated.user_name);
                ModelOutcome::success(updated)
            }
            Ok(None) => {
                let reason = format!("user {} not found to update", user.user_name);
                ModelOutcome::failure(user, ModelStatus::NotFound, reason)
            }
            Err(e) => {
                warn!("update failed for user '{}': {}", user.user_name, e);
                let reason = format!("failed to update record for user '{}': {}", user.user_name, e);
                ModelOutcome::failure(user, ModelStatus::UpdateFailure, reason)
            }
        }
    }

    /// Delete one user, returning the record as it was before removal. A
    /// missing user ends the call without attempting the delete.
    pub async fn delete_user(&self, user_name: &str) -> ModelOutcome<User> {
        if user_name.is_empty() {
            return ModelOutcome::failure(User::default(), ModelStatus::DeleteFailure, "User name not supplied");
        }

        let existing = self.get_user(user_name).await;
        match existing.status {
            ModelStatus::Success => {}
            ModelStatus::NotFound => return existing,
            _ => {
                return ModelOutcome::failure(User::default(), ModelStatus::DeleteFailure, existing.reason);
            }
        }

        match self.store.delete_by_name(user_name).await {
            // Removed by another request between lookup and delete
            Ok(0) => ModelOutcome::failure(
                User::default(),
                ModelStatus::NotFound,
                format!("failed to retrieve record for user '{}': user not found", user_name),
            ),
            Ok(removed) => {
                info!("deleted user '{}' ({} row)", user_name, removed);
                ModelOutcome::success(existing.value)
            }
            Err(e) => {
                warn!("delete failed for user '{}': {}", user_name, e);
                ModelOutcome::failure(
                    User::default(),
                    ModelStatus::DeleteFailure,
                    format!("failed to delete record for user '{}': {}", user_name, e),
                )
            }
        }
    }

    pub async fn delete_all_users(&self) -> ModelOutcome<()> {
        match self.store.delete_all().await {
            Ok(()) => {
                info!("deleted all users");
                ModelOutcome::success(())
            }
            Err(e) => {
                warn!("delete all failed: {}", e);
                ModelOutcome::failure((), ModelStatus::DeleteFailure, format!("failed to delete all records: {}", e))
            }
        }
    }
}
