use thiserror::Error;

/// Error type for identity token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailure(String),

    #[error("Failed to parse token: {0}")]
    ParseFailure(String),

    #[error("Unexpected signing algorithm: {0}")]
    AlgorithmMismatch(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Token subject is not a valid identifier: {0}")]
    MalformedSubject(String),
}
