use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// JWT token handler for issuing and verifying tokens.
///
/// Uses HS256 (HMAC with SHA-256) keyed by a process-wide secret. The
/// secret is checked at the moment a token is issued or verified, not
/// at construction, so an unconfigured secret surfaces as a
/// `MissingSecret` error on first use.
pub struct TokenHandler {
    secret: Vec<u8>,
    algorithm: Algorithm,
}

impl TokenHandler {
    /// Create a new token handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - Rotate secrets periodically
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier embedded in the claim set
    /// * `ttl_hours` - Hours until the token expires
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `MissingSecret` - Signing secret is unset or empty
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl_hours: i64) -> Result<String, TokenError> {
        let claims = Claims::new(subject, ttl_hours);
        self.encode(&claims)
    }

    /// Encode an explicit claim set into a token.
    ///
    /// # Errors
    /// * `MissingSecret` - Signing secret is unset or empty
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let header = Header::new(self.algorithm);
        let key = EncodingKey::from_secret(&self.secret);

        encode(&header, claims, &key).map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// Decoded claim set
    ///
    /// # Errors
    /// * `MissingSecret` - Signing secret is unset or empty
    /// * `Malformed` - String cannot be parsed as a token
    /// * `BadSignature` - Signature does not match
    /// * `Expired` - Token is past its expiry
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let validation = Validation::new(self.algorithm);
        let key = DecodingKey::from_secret(&self.secret);

        let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed(e.to_string()),
        })?;

        Ok(token_data.claims)
    }
}
