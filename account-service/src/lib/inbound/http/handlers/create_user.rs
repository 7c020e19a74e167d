use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use super::ApiSuccess;
use super::USER_ENTITY;
use super::UserData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Cpf;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Telephone;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::validation::validate_registration;
use crate::domain::user::validation::RegistrationInput;
use crate::inbound::http::report::ErrorReport;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ErrorReport> {
    // Caller-side normalization, applied before any validation.
    let cpf = Cpf::normalize(&body.cpf);
    let telephone = Telephone::normalize(&body.telephone);

    let failures = validate_registration(&RegistrationInput {
        cpf: &cpf,
        email: &body.email,
        telephone: &telephone,
        password: &body.password,
    });

    if !failures.is_empty() {
        let mut report = ErrorReport::new();
        for failure in failures {
            report.add(
                USER_ENTITY,
                failure.field,
                StatusCode::BAD_REQUEST,
                failure.message,
            );
        }
        return Err(report);
    }

    let command = CreateUserCommand {
        cpf: Cpf::new(cpf).map_err(UserError::from)?,
        name: body.name,
        email: EmailAddress::new(body.email).map_err(UserError::from)?,
        telephone: Telephone::new(telephone).map_err(UserError::from)?,
        birthday: body.birthday,
        password: body.password,
    };

    state
        .user_service
        .register(command)
        .await
        .map_err(ErrorReport::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    pub cpf: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub birthday: Option<NaiveDate>,
    pub password: String,
}
