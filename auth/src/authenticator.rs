use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuing.
///
/// Provides the all-or-nothing login primitive: verify a plaintext
/// password against a stored hash and, only on a match, issue a signed
/// time-limited token for the subject.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_handler: TokenHandler,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    pub fn new(token_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_handler: TokenHandler::new(token_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Subject identifier embedded in the token
    /// * `ttl_hours` - Hours until the token expires
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `TokenError` - Secret unset or token issuing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        ttl_hours: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_handler.issue(subject, ttl_hours)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate a token and return its claim set.
    ///
    /// # Errors
    /// * `TokenError` - Secret unset, or token malformed, forged, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let password = "Secret123!";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, "user-42", 8)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let claims = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, "user-42");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let hash = authenticator
            .hash_password("Secret123!")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "user-42", 8);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unreadable_hash_is_invalid_credentials() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let result = authenticator.authenticate("Secret123!", "corrupted-hash", "user-42", 8);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_with_empty_secret_fails_after_password_check() {
        let authenticator = Authenticator::new(b"");

        let hash = authenticator
            .hash_password("Secret123!")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("Secret123!", &hash, "user-42", 8);
        assert!(matches!(
            result,
            Err(AuthenticationError::TokenError(TokenError::MissingSecret))
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
