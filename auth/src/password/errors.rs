use thiserror::Error;

/// Error type for credential hashing operations.
///
/// `Mismatch` deliberately covers both a wrong secret and an unreadable
/// stored hash.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Empty secret not allowed")]
    EmptySecret,

    #[error("Secret does not match stored hash")]
    Mismatch,

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
