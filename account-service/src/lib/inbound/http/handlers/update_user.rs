use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use super::ApiSuccess;
use super::USER_ENTITY;
use super::UserData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Cpf;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Telephone;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::validation;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::report::ErrorReport;
use crate::inbound::http::router::AppState;

pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ErrorReport> {
    // The gate resolved the caller; an absent user_id defaults to them.
    let target = match &body.user_id {
        Some(raw) => UserId::from_string(raw).map_err(UserError::from)?,
        None => auth.user_id,
    };

    let command = body.try_into_command()?;

    state
        .user_service
        .update_user(&target, command)
        .await
        .map_err(ErrorReport::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for partially updating a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    pub user_id: Option<String>,
    pub cpf: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Validate every provided field, collecting all failures in the
    /// same fixed order the registration validator uses.
    fn try_into_command(self) -> Result<UpdateUserCommand, ErrorReport> {
        let mut report = ErrorReport::new();

        let cpf = self.cpf.map(|raw| Cpf::normalize(&raw));
        if let Some(cpf) = &cpf {
            if !validation::is_valid_cpf(cpf) {
                report.add(
                    USER_ENTITY,
                    "cpf",
                    StatusCode::BAD_REQUEST,
                    "Invalid CPF format",
                );
            }
        }

        if let Some(email) = &self.email {
            if !validation::is_valid_email(email) {
                report.add(
                    USER_ENTITY,
                    "email",
                    StatusCode::BAD_REQUEST,
                    "Invalid email format",
                );
            }
        }

        let telephone = self.telephone.map(|raw| Telephone::normalize(&raw));
        if let Some(telephone) = &telephone {
            if !validation::is_valid_telephone(telephone) {
                report.add(
                    USER_ENTITY,
                    "telephone",
                    StatusCode::BAD_REQUEST,
                    "Invalid phone number format",
                );
            }
        }

        if let Some(password) = &self.password {
            if !validation::is_valid_password(password) {
                report.add(
                    USER_ENTITY,
                    "password",
                    StatusCode::BAD_REQUEST,
                    format!(
                        "Password must be at least {} characters long",
                        validation::MIN_PASSWORD_LENGTH
                    ),
                );
            }
        }

        if report.has_errors() {
            return Err(report);
        }

        Ok(UpdateUserCommand {
            cpf: cpf.map(Cpf::new).transpose().map_err(UserError::from)?,
            name: self.name,
            email: self
                .email
                .map(EmailAddress::new)
                .transpose()
                .map_err(UserError::from)?,
            telephone: telephone
                .map(Telephone::new)
                .transpose()
                .map_err(UserError::from)?,
            birthday: self.birthday,
            password: self.password,
        })
    }
}
