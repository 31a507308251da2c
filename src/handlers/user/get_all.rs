// handlers/user/get_all.rs - GET /user/getAll handler
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::UserGetAllOperationResult;
use crate::state::AppState;

/// GET /user/getAll - List every user. Any request body is ignored.
pub async fn get_all(State(state): State<AppState>) -> (StatusCode, Json<UserGetAllOperationResult>) {
    info!("getAll: request for all users");

    let outcome = state.users.get_all_users().await;
    let status = outcome.status.http_status();

    info!("getAll: returning {} ({}, {} users)", status, outcome.status, outcome.value.len());
    (status, Json(outcome.into()))
}
