// handlers/user/update.rs - PUT /user/update handler
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::{JsonBody, UserOperationResult};
use crate::database::User;
use crate::state::AppState;

/// PUT /user/update - Replace email and password of an existing user
///
/// The body is a full user record; `UserName` selects the user and is
/// never changed. An unknown user yields 404 and nothing is created.
pub async fn update(
    State(state): State<AppState>,
    JsonBody(user): JsonBody<User>,
) -> (StatusCode, Json<UserOperationResult>) {
    info!("update: request for user '{}'", user.user_name);

    let outcome = state.users.update_user(user).await;
    let status = outcome.status.http_status();

    info!("update: returning {} ({})", status, outcome.status);
    (status, Json(outcome.into()))
}
