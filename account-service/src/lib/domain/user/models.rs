use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::user::errors::CpfError;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::TelephoneError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::lifecycle::Lifecycle;
use crate::domain::user::validation;

/// User aggregate entity.
///
/// The stored `password_hash` is write-only state: it is compared
/// during login and never serialized into any response payload.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub cpf: Cpf,
    pub name: String,
    pub email: EmailAddress,
    pub telephone: Telephone,
    pub birthday: Option<NaiveDate>,
    pub password_hash: String,
    pub lifecycle: Lifecycle,
}

impl User {
    /// Whether this user may authenticate or pass the authorization
    /// gate. Policy: only `Active` users; inactive users are rejected
    /// the same way missing ones are.
    pub fn is_authenticatable(&self) -> bool {
        self.lifecycle.is_active()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// CPF value type — the natural key users log in with.
///
/// Stored and compared in normalized, digits-only form. Construction
/// validates length and both mod-11 check digits; normalization of
/// caller input (stripping punctuation) is a separate explicit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpf(String);

impl Cpf {
    /// Create a validated CPF from a digits-only string.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not 11 digits or check digits do not match
    pub fn new(cpf: String) -> Result<Self, CpfError> {
        if validation::is_valid_cpf(&cpf) {
            Ok(Self(cpf))
        } else {
            Err(CpfError::InvalidFormat)
        }
    }

    /// Strip formatting characters (dots, dashes, spaces) from a raw
    /// CPF. Applied by callers before validation or lookup.
    pub fn normalize(raw: &str) -> String {
        validation::normalize_digits(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if validation::is_valid_email(&email) {
            Ok(Self(email))
        } else {
            Err(EmailError::InvalidFormat)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Telephone value type, digits-only Brazilian number with area code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Telephone(String);

impl Telephone {
    /// Create a validated telephone from a digits-only string.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a 10 or 11 digit number
    pub fn new(telephone: String) -> Result<Self, TelephoneError> {
        if validation::is_valid_telephone(&telephone) {
            Ok(Self(telephone))
        } else {
            Err(TelephoneError::InvalidFormat)
        }
    }

    /// Strip formatting characters from a raw phone number.
    pub fn normalize(raw: &str) -> String {
        validation::normalize_digits(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub cpf: Cpf,
    pub name: String,
    pub email: EmailAddress,
    pub telephone: Telephone,
    pub birthday: Option<NaiveDate>,
    pub password: String,
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates; only provided
/// fields are written. A provided password is re-hashed by the service.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub cpf: Option<Cpf>,
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub telephone: Option<Telephone>,
    pub birthday: Option<NaiveDate>,
    pub password: Option<String>,
}
