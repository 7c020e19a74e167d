use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::inbound::http::report::ErrorReport;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod login;
pub mod update_user;

/// Entity tag used in error entries for user-related failures.
pub const USER_ENTITY: &str = "user";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

impl From<UserError> for ErrorReport {
    fn from(err: UserError) -> Self {
        match err {
            UserError::ValidationFailed(failures) => {
                let mut report = ErrorReport::new();
                for failure in failures {
                    report.add(
                        USER_ENTITY,
                        failure.field,
                        StatusCode::BAD_REQUEST,
                        failure.message,
                    );
                }
                report
            }
            UserError::InvalidUserId(_) => ErrorReport::single(
                USER_ENTITY,
                "id",
                StatusCode::BAD_REQUEST,
                err.to_string(),
            ),
            UserError::InvalidCpf(_) => ErrorReport::single(
                USER_ENTITY,
                "cpf",
                StatusCode::BAD_REQUEST,
                err.to_string(),
            ),
            UserError::InvalidEmail(_) => ErrorReport::single(
                USER_ENTITY,
                "email",
                StatusCode::BAD_REQUEST,
                err.to_string(),
            ),
            UserError::InvalidTelephone(_) => ErrorReport::single(
                USER_ENTITY,
                "telephone",
                StatusCode::BAD_REQUEST,
                err.to_string(),
            ),
            UserError::NotFound(_) | UserError::NotFoundByCpf(_) => ErrorReport::single(
                USER_ENTITY,
                "id",
                StatusCode::NOT_FOUND,
                "User not found",
            ),
            UserError::CpfAlreadyExists(_) => ErrorReport::single(
                USER_ENTITY,
                "cpf",
                StatusCode::CONFLICT,
                "CPF already registered",
            ),
            UserError::EmailAlreadyExists(_) => ErrorReport::single(
                USER_ENTITY,
                "email",
                StatusCode::CONFLICT,
                "Email already registered",
            ),
            UserError::InvalidCredentials => ErrorReport::single(
                USER_ENTITY,
                "credentials",
                StatusCode::UNAUTHORIZED,
                "Invalid CPF and/or password",
            ),
            // Internal details are logged, never echoed to the caller.
            UserError::PasswordHash(detail) | UserError::Store(detail) => {
                tracing::error!(error = %detail, "Internal error while handling user request");
                ErrorReport::single(
                    USER_ENTITY,
                    "internal",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                )
            }
        }
    }
}

/// Response shape for a user record. The password hash never appears
/// here or in any other payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub cpf: String,
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            cpf: user.cpf.as_str().to_string(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            telephone: user.telephone.as_str().to_string(),
            birthday: user.birthday,
            created_at: user.lifecycle.created_at,
        }
    }
}
