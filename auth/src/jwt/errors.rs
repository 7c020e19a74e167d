use thiserror::Error;

/// Error type for token operations.
///
/// The verification variants (`Malformed`, `BadSignature`, `Expired`)
/// are for logging and tests only; at the HTTP boundary they all
/// collapse to the same generic 401 so the caller learns nothing about
/// why a token was rejected. `MissingSecret` is an operator-caused
/// misconfiguration and maps to a 500.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing secret is not configured")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token cannot be parsed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
