use chrono::Duration;

use crate::config::AuthConfig;
use crate::jwt::TokenAuthority;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::subject::Subject;

/// Authentication coordinator combining credential verification and token issuance.
///
/// Wraps the primitives for request handlers: every verification failure
/// is reported as the same `InvalidCredentials`, so a remote caller cannot
/// tell a wrong password from a bad or expired token.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_authority: TokenAuthority,
    signing_secret: Vec<u8>,
    token_lifetime: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed identity token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl From<PasswordError> for AuthenticationError {
    fn from(error: PasswordError) -> Self {
        match error {
            PasswordError::EmptySecret | PasswordError::Mismatch => {
                AuthenticationError::InvalidCredentials
            }
            PasswordError::InvalidParams(_) | PasswordError::HashingFailed(_) => {
                AuthenticationError::Internal(error.to_string())
            }
        }
    }
}

impl From<TokenError> for AuthenticationError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::SigningFailure(_) => AuthenticationError::Internal(error.to_string()),
            TokenError::ParseFailure(_)
            | TokenError::AlgorithmMismatch(_)
            | TokenError::SignatureInvalid
            | TokenError::Expired
            | TokenError::MalformedSubject(_) => AuthenticationError::InvalidCredentials,
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher used for new credentials
    /// * `token_authority` - Authority used to issue and validate tokens
    /// * `signing_secret` - Shared HMAC key
    /// * `token_lifetime` - Validity of issued tokens
    pub fn new(
        password_hasher: PasswordHasher,
        token_authority: TokenAuthority,
        signing_secret: &[u8],
        token_lifetime: Duration,
    ) -> Self {
        Self {
            password_hasher,
            token_authority,
            signing_secret: signing_secret.to_vec(),
            token_lifetime,
        }
    }

    /// Build an authenticator from loaded configuration.
    ///
    /// # Errors
    /// * `Internal` - Configured work factor is rejected by Argon2 or the
    ///   token lifetime is out of range
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::with_params(config.hashing)?;
        let token_lifetime = config
            .token
            .expiration()
            .map_err(|e| AuthenticationError::Internal(e.to_string()))?;
        let token_authority = TokenAuthority::new()
            .with_issuer(&config.token.issuer)
            .with_leeway(config.token.leeway_seconds);

        Ok(Self::new(
            password_hasher,
            token_authority,
            config.token.secret.as_bytes(),
            token_lifetime,
        ))
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Secret is empty or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for the subject.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password is empty or does not match
    /// * `Internal` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &Subject,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|e| {
                tracing::info!(subject = %subject, reason = %e, "Authentication failed");
                AuthenticationError::from(e)
            })?;

        let access_token =
            self.token_authority
                .issue(subject, &self.signing_secret, self.token_lifetime)?;

        tracing::debug!(subject = %subject, "Authentication succeeded");

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `TokenError` - Token signing failed
    pub fn generate_token(&self, subject: &Subject) -> Result<String, TokenError> {
        self.token_authority
            .issue(subject, &self.signing_secret, self.token_lifetime)
    }

    /// Validate a bearer token and return its subject.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token failed any validation step
    pub fn authorize(&self, token: &str) -> Result<Subject, AuthenticationError> {
        self.token_authority
            .validate(token, &self.signing_secret)
            .map_err(|e| {
                tracing::info!(reason = %e, "Token authorization failed");
                AuthenticationError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::HashingParams;

    fn authenticator(secret: &[u8], lifetime: Duration) -> Authenticator {
        let hasher = PasswordHasher::with_params(HashingParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher");

        Authenticator::new(hasher, TokenAuthority::new(), secret, lifetime)
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator(b"test_secret_key_at_least_32_bytes!", Duration::hours(1));
        let subject = Subject::new();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("my_password", &hash, &subject)
            .expect("Authentication failed");
        assert!(!result.access_token.is_empty());

        let authorized = authenticator
            .authorize(&result.access_token)
            .expect("Token authorization failed");
        assert_eq!(authorized, subject);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator(b"test_secret_key_at_least_32_bytes!", Duration::hours(1));

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, &Subject::new());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));

        let result = authenticator.authenticate("", &hash, &Subject::new());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let issuer = authenticator(b"test_secret_key_at_least_32_bytes!", Duration::hours(1));
        let other = authenticator(b"other_secret_key_at_least_32_bytes", Duration::hours(1));
        let expired = authenticator(b"test_secret_key_at_least_32_bytes!", Duration::hours(-1));

        let token = issuer
            .generate_token(&Subject::new())
            .expect("Failed to generate token");
        let expired_token = expired
            .generate_token(&Subject::new())
            .expect("Failed to generate token");

        assert_eq!(
            other.authorize(&token),
            Err(AuthenticationError::InvalidCredentials)
        );
        assert_eq!(
            issuer.authorize(&expired_token),
            Err(AuthenticationError::InvalidCredentials)
        );
        assert_eq!(
            issuer.authorize("invalid.token.here"),
            Err(AuthenticationError::InvalidCredentials)
        );
    }

    #[test]
    fn test_from_config() {
        let config = AuthConfig {
            hashing: HashingParams {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            token: crate::config::TokenConfig {
                secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
                issuer: "chirpy".to_string(),
                expiration_seconds: 60,
                leeway_seconds: 0,
            },
        };

        let authenticator = Authenticator::from_config(&config).expect("Failed to build");
        let subject = Subject::new();
        let token = authenticator
            .generate_token(&subject)
            .expect("Failed to generate token");

        assert_eq!(authenticator.authorize(&token), Ok(subject));
    }

    #[test]
    fn test_from_config_rejects_bad_params() {
        let config = AuthConfig {
            hashing: HashingParams {
                memory_kib: 1024,
                iterations: 0,
                parallelism: 1,
            },
            token: crate::config::TokenConfig {
                secret: "secret".to_string(),
                issuer: "chirpy".to_string(),
                expiration_seconds: 60,
                leeway_seconds: 0,
            },
        };

        assert!(matches!(
            Authenticator::from_config(&config),
            Err(AuthenticationError::Internal(_))
        ));
    }

    #[test]
    fn test_from_config_rejects_out_of_range_lifetime() {
        let config = AuthConfig {
            hashing: HashingParams {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            token: crate::config::TokenConfig {
                secret: "secret".to_string(),
                issuer: "chirpy".to_string(),
                expiration_seconds: i64::MAX,
                leeway_seconds: 0,
            },
        };

        assert!(matches!(
            Authenticator::from_config(&config),
            Err(AuthenticationError::Internal(_))
        ));
    }
}
