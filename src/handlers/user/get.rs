// handlers/user/get.rs - GET /user/get handler
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::{JsonBody, UserNameOperation, UserOperationResult};
use crate::state::AppState;

/// GET /user/get - Fetch one user by the `UserName` in the request body
pub async fn get(
    State(state): State<AppState>,
    JsonBody(op): JsonBody<UserNameOperation>,
) -> (StatusCode, Json<UserOperationResult>) {
    info!("get: request for user '{}'", op.user_name);

    let outcome = state.users.get_user(&op.user_name).await;
    let status = outcome.status.http_status();

    info!("get: returning {} ({})", status, outcome.status);
    (status, Json(outcome.into()))
}
