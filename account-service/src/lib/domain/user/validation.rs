use std::str::FromStr;

use serde::Serialize;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw registration fields as received from the caller, after
/// normalization (digit-stripping for cpf and telephone) but before
/// value-object construction.
#[derive(Debug, Clone)]
pub struct RegistrationInput<'a> {
    pub cpf: &'a str,
    pub email: &'a str,
    pub telephone: &'a str,
    pub password: &'a str,
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Run every field check and collect all failures.
///
/// Checks never short-circuit and run in a fixed order (cpf, email,
/// telephone, password) so the same bad input always yields the same
/// ordered list. Each check is a pure predicate over one field; no
/// external state is consulted.
pub fn validate_registration(input: &RegistrationInput<'_>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_valid_cpf(input.cpf) {
        errors.push(ValidationError::new("cpf", "Invalid CPF format"));
    }

    if !is_valid_email(input.email) {
        errors.push(ValidationError::new("email", "Invalid email format"));
    }

    if !is_valid_telephone(input.telephone) {
        errors.push(ValidationError::new(
            "telephone",
            "Invalid phone number format",
        ));
    }

    if !is_valid_password(input.password) {
        errors.push(ValidationError::new(
            "password",
            format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }

    errors
}

/// Validate a CPF (Brazilian tax id) already normalized to digits only.
///
/// Requires exactly 11 digits, rejects the all-equal sequences the
/// check digits cannot catch, and verifies both mod-11 check digits.
pub fn is_valid_cpf(cpf: &str) -> bool {
    if cpf.len() != 11 || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u8> = cpf.bytes().map(|b| b - b'0').collect();

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Mod-11 check digit over a digit prefix, weights descending from
/// `len + 1` down to 2.
fn check_digit(digits: &[u8]) -> u8 {
    let len = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (len + 1 - i as u32))
        .sum();

    ((sum * 10) % 11 % 10) as u8
}

/// RFC 5322 email check, delegated to the `email_address` parser.
pub fn is_valid_email(email: &str) -> bool {
    email_address::EmailAddress::from_str(email).is_ok()
}

/// Validate a Brazilian phone number normalized to digits only:
/// two-digit area code plus an 8-digit landline or 9-digit mobile
/// number.
pub fn is_valid_telephone(telephone: &str) -> bool {
    (telephone.len() == 10 || telephone.len() == 11)
        && telephone.bytes().all(|b| b.is_ascii_digit())
}

/// Minimum-length password policy.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Strip everything but ASCII digits; the caller-side normalization
/// step applied to cpf and telephone before validation.
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
