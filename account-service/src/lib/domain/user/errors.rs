use thiserror::Error;

use crate::domain::user::validation::ValidationError;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for CPF validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CpfError {
    #[error("Invalid CPF format")]
    InvalidFormat,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat,
}

/// Error for Telephone validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TelephoneError {
    #[error("Invalid phone number format")]
    InvalidFormat,
}

/// Top-level error for all user-related operations.
///
/// Only `Store` and `PasswordHash` are operator/infrastructure errors;
/// everything else is attributable to the caller. `NotFoundByCpf` and
/// `InvalidCredentials` are kept distinct for logging but must be
/// indistinguishable in login responses.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid CPF: {0}")]
    InvalidCpf(#[from] CpfError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid telephone: {0}")]
    InvalidTelephone(#[from] TelephoneError),

    #[error("Validation failed")]
    ValidationFailed(Vec<ValidationError>),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User not found with CPF: {0}")]
    NotFoundByCpf(String),

    #[error("CPF already registered: {0}")]
    CpfAlreadyExists(String),

    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Store(String),
}
