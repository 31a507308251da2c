// handlers/user/register.rs - POST /user/register handler
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::{JsonBody, UserOperationResult};
use crate::database::User;
use crate::state::AppState;

/// POST /user/register - Register a new user
///
/// Expected Input:
/// ```json
/// {
///   "UserName": "string",   // Required, unique
///   "Email": "string",      // Required
///   "Password": "string"    // Required
/// }
/// ```
///
/// Responds 201 with the stored user (including its assigned `ID`) on success.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(new_user): JsonBody<User>,
) -> (StatusCode, Json<UserOperationResult>) {
    info!("register: request for user '{}'", new_user.user_name);

    let outcome = state.users.create_user(new_user).await;
    let status = if outcome.status.is_success() {
        StatusCode::CREATED
    } else {
        outcome.status.http_status()
    };

    info!("register: returning {} ({})", status, outcome.status);
    (status, Json(outcome.into()))
}
