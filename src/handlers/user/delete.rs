// handlers/user/delete.rs - DELETE /user/delete and DELETE /user/deleteAll handlers
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::{JsonBody, SimpleOperationResult, UserNameOperation, UserOperationResult};
use crate::state::AppState;

/// DELETE /user/delete - Remove the user named in the body, returning the removed record
pub async fn delete(
    State(state): State<AppState>,
    JsonBody(op): JsonBody<UserNameOperation>,
) -> (StatusCode, Json<UserOperationResult>) {
    info!("delete: request for user '{}'", op.user_name);

    let outcome = state.users.delete_user(&op.user_name).await;
    let status = outcome.status.http_status();

    info!("delete: returning {} ({})", status, outcome.status);
    (status, Json(outcome.into()))
}

/// DELETE /user/deleteAll - Remove every user. Any request body is ignored.
pub async fn delete_all(State(state): State<AppState>) -> (StatusCode, Json<SimpleOperationResult>) {
    info!("deleteAll: request to remove all users");

    let outcome = state.users.delete_all_users().await;
    let status = outcome.status.http_status();

    info!("deleteAll: returning {} ({})", status, outcome.status);
    (status, Json(outcome.into()))
}
