use axum::extract::State;
use axum::http::StatusCode;

use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::report::ErrorReport;
use crate::inbound::http::router::AppState;

/// List every live user. Soft-deleted accounts never appear.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserData>>, ErrorReport> {
    state
        .user_service
        .list_users()
        .await
        .map_err(ErrorReport::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}
