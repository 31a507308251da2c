use std::sync::Arc;

use crate::database::{MemoryUserStore, UserStore};
use crate::services::UserService;

/// Shared per-process state handed to every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(store),
        }
    }

    /// State over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryUserStore::new()))
    }
}
