use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::UserData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::report::ErrorReport;
use crate::inbound::http::router::AppState;

/// Return the authenticated caller's own profile.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ErrorReport> {
    state
        .user_service
        .get_user(&auth.user_id)
        .await
        .map_err(ErrorReport::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// Return another user's record by id.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ErrorReport> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ErrorReport::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
