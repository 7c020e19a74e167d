use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::USER_ENTITY;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::report::ErrorReport;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved caller identity, attached to
/// request extensions once the gate has passed. Per-request value,
/// never shared between requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Authorization gate for protected routes.
///
/// Verifies the bearer token, then re-checks that the subject still
/// resolves to a live, active user; possession of an unexpired token
/// is not enough once the record was soft-deleted or inactivated.
/// Every token rejection looks the same to the caller; the distinct
/// reason is only logged.
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ErrorReport> {
    let token = extract_bearer_token(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        if e == auth::TokenError::MissingSecret {
            tracing::error!("Token signing secret is not configured");
            return ErrorReport::single(
                USER_ENTITY,
                "token",
                StatusCode::INTERNAL_SERVER_ERROR,
                "Token signing secret is not configured",
            );
        }
        tracing::warn!(error = %e, "Token verification failed");
        invalid_token()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a valid user id");
        invalid_token()
    })?;

    // Deleted users disappear from this lookup; inactive ones are
    // rejected the same way.
    let user = state.user_service.get_user(&user_id).await.map_err(|e| {
        match e {
            UserError::NotFound(_) => {
                tracing::debug!(user_id = %user_id, "Token subject no longer exists")
            }
            ref other => tracing::error!(error = %other, "User lookup failed during authorization"),
        }
        ErrorReport::from(e)
    })?;

    if !user.is_authenticatable() {
        tracing::debug!(user_id = %user_id, "Token subject is inactive");
        return Err(ErrorReport::single(
            USER_ENTITY,
            "id",
            StatusCode::NOT_FOUND,
            "User not found",
        ));
    }

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn invalid_token() -> ErrorReport {
    ErrorReport::single(
        USER_ENTITY,
        "token",
        StatusCode::UNAUTHORIZED,
        "Invalid or expired token",
    )
}

fn extract_bearer_token(req: &Request) -> Result<&str, ErrorReport> {
    let missing = || {
        ErrorReport::single(
            USER_ENTITY,
            "token",
            StatusCode::UNAUTHORIZED,
            "Invalid or missing authentication token",
        )
    };

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(missing)?;

    let auth_str = auth_header.to_str().map_err(|_| missing())?;

    auth_str.strip_prefix("Bearer ").ok_or_else(missing)
}
