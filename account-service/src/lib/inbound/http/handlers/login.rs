use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::USER_ENTITY;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Cpf;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::report::ErrorReport;
use crate::inbound::http::router::AppState;

/// Message returned for every credential failure. A missing CPF, a
/// wrong password and an inactive account all produce this exact
/// response so the endpoint cannot be used to enumerate accounts.
const INVALID_CREDENTIALS: &str = "Invalid CPF and/or password";

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ErrorReport> {
    if body.cpf.trim().is_empty() || body.password.is_empty() {
        return Err(ErrorReport::single(
            USER_ENTITY,
            "credentials",
            StatusCode::BAD_REQUEST,
            "Missing required fields",
        ));
    }

    let cpf = match Cpf::new(Cpf::normalize(&body.cpf)) {
        Ok(cpf) => cpf,
        Err(_) => {
            // Not a plausible CPF; respond exactly as for an unknown one.
            tracing::debug!("Login attempt with malformed CPF");
            return Err(invalid_credentials());
        }
    };

    let user = match state.user_service.get_user_by_cpf(&cpf).await {
        Ok(user) => user,
        Err(UserError::NotFoundByCpf(_)) => {
            tracing::debug!("Login attempt for unknown CPF");
            return Err(invalid_credentials());
        }
        Err(e) => return Err(ErrorReport::from(e)),
    };

    if !user.is_authenticatable() {
        tracing::debug!(user_id = %user.id, "Login attempt for inactive account");
        return Err(invalid_credentials());
    }

    let result = state
        .authenticator
        .authenticate(
            &body.password,
            &user.password_hash,
            &user.id.to_string(),
            state.token_ttl_hours,
        )
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                invalid_credentials()
            }
            auth::AuthenticationError::TokenError(auth::TokenError::MissingSecret) => {
                ErrorReport::single(
                    USER_ENTITY,
                    "token",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Token signing secret is not configured",
                )
            }
            auth::AuthenticationError::PasswordError(err) => {
                ErrorReport::from(UserError::PasswordHash(err.to_string()))
            }
            auth::AuthenticationError::TokenError(err) => {
                ErrorReport::from(UserError::Store(format!("Token issuing failed: {}", err)))
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            subject: user.id.to_string(),
            token: result.access_token,
        },
    ))
}

fn invalid_credentials() -> ErrorReport {
    ErrorReport::single(
        USER_ENTITY,
        "credentials",
        StatusCode::UNAUTHORIZED,
        INVALID_CREDENTIALS,
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub subject: String,
    pub token: String,
}
