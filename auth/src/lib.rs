//! Authentication primitives for chirpy
//!
//! Two independent building blocks:
//! - Credential hashing (Argon2id, configurable work factor)
//! - Signed, expiring identity tokens (HS256 JWT) bound to a UUID subject
//!
//! Both are pure functions of their inputs: no I/O, no shared mutable state.
//! Callers own the plaintext secrets, the signing secret and persistence.
//!
//! # Examples
//!
//! ## Credential Hashing
//! ```
//! use chirpy_auth::password::{hash_secret, verify_secret};
//!
//! let hash = hash_secret("my_password").unwrap();
//! assert!(verify_secret("my_password", &hash).is_ok());
//! assert!(verify_secret("not_my_password", &hash).is_err());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use chirpy_auth::jwt::{issue_token, validate_token};
//! use chirpy_auth::Subject;
//! use chrono::Duration;
//!
//! let subject = Subject::new();
//! let token = issue_token(&subject, b"secret_key_at_least_32_bytes_long!", Duration::hours(1)).unwrap();
//! let validated = validate_token(&token, b"secret_key_at_least_32_bytes_long!").unwrap();
//! assert_eq!(validated, subject);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use chirpy_auth::{Authenticator, PasswordHasher, Subject, TokenAuthority};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::new(),
//!     TokenAuthority::new(),
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(1),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let user = Subject::new();
//! let result = auth.authenticate("password123", &hash, &user).unwrap();
//!
//! // Later requests: validate token
//! assert_eq!(auth.authorize(&result.access_token).unwrap(), user);
//! ```

pub mod authenticator;
pub mod config;
pub mod jwt;
pub mod password;
pub mod subject;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use jwt::IdentityClaims;
pub use jwt::TokenAuthority;
pub use jwt::TokenError;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use subject::Subject;
pub use subject::SubjectError;
