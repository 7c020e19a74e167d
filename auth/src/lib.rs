//! Authentication infrastructure library
//!
//! Provides the security primitives used by the account service:
//! - Password hashing (Argon2id)
//! - JWT token issuing and verification
//! - Authentication coordination
//!
//! The service defines its own ports and adapts these implementations,
//! keeping HTTP and persistence concerns out of this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, TokenHandler};
//!
//! let handler = TokenHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("user-42", 8).unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user-42");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user-42", 8).unwrap();
//!
//! // Validate token on a later request
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user-42");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
