use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::report::ErrorReport;
use crate::inbound::http::router::AppState;

/// Soft-delete a user. Without an explicit `user_id` the caller
/// deletes their own account.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    body: Option<Json<DeleteUserRequest>>,
) -> Result<StatusCode, ErrorReport> {
    let target = match body.as_ref().and_then(|b| b.user_id.as_deref()) {
        Some(raw) => UserId::from_string(raw).map_err(UserError::from)?,
        None => auth.user_id,
    };

    state
        .user_service
        .delete_user(&target)
        .await
        .map_err(ErrorReport::from)?;

    Ok(StatusCode::NO_CONTENT)
}

/// HTTP request body for soft-deleting a user (raw JSON, optional)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteUserRequest {
    pub user_id: Option<String>,
}
