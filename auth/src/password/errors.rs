use thiserror::Error;

/// Error type for password hashing.
///
/// Verification has no error channel: a hash that cannot be parsed
/// simply fails to verify.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
