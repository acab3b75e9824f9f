use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::errors::TokenError;
use super::header::hmac_algorithm;
use crate::subject::Subject;

/// Issuer written into every token unless configured otherwise.
pub const DEFAULT_ISSUER: &str = "chirpy";

/// Issues and validates signed, expiring identity tokens.
///
/// Tokens are HS256-signed JWTs. The authority holds no key material: the
/// signing secret is supplied on every call, so one authority can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct TokenAuthority {
    issuer: String,
    leeway: u64,
    algorithm: Algorithm,
}

impl TokenAuthority {
    /// Create an authority with the default issuer and no expiry leeway.
    pub fn new() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            leeway: 0,
            algorithm: Algorithm::HS256,
        }
    }

    /// Set the issuer claim written into new tokens.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    /// Allow `seconds` of clock skew when checking expiry.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }

    /// Issuer claim written into new tokens.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identifier of the authenticated principal
    /// * `signing_secret` - Shared HMAC key
    /// * `valid_for` - Lifetime from now; negative values mint already-expired tokens
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `SigningFailure` - Secret is empty, expiry is out of range or token encoding failed
    pub fn issue(
        &self,
        subject: &Subject,
        signing_secret: &[u8],
        valid_for: Duration,
    ) -> Result<String, TokenError> {
        if signing_secret.is_empty() {
            return Err(TokenError::SigningFailure(
                "signing secret must not be empty".to_string(),
            ));
        }

        let claims = IdentityClaims::new(&self.issuer, subject, Utc::now(), valid_for)
            .ok_or_else(|| {
                TokenError::SigningFailure(format!("token lifetime out of range: {}", valid_for))
            })?;
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &EncodingKey::from_secret(signing_secret)).map_err(|e| {
            tracing::warn!(error = %e, "Token signing failed");
            TokenError::SigningFailure(e.to_string())
        })
    }

    /// Validate a token and recover its subject.
    ///
    /// The declared algorithm is checked before the token is handed to
    /// the signature library, then the MAC, then expiry, then the subject.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    /// * `signing_secret` - Shared HMAC key used at issuance
    ///
    /// # Returns
    /// Subject carried by the token
    ///
    /// # Errors
    /// * `ParseFailure` - Token or its claims are malformed
    /// * `AlgorithmMismatch` - Token is not HMAC-signed
    /// * `SignatureInvalid` - MAC does not match `signing_secret`
    /// * `Expired` - Token is past its expiry
    /// * `MalformedSubject` - Subject claim is not a UUID
    pub fn validate(&self, token: &str, signing_secret: &[u8]) -> Result<Subject, TokenError> {
        let algorithm = hmac_algorithm(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected before signature check");
            e
        })?;

        if signing_secret.is_empty() {
            tracing::debug!("Token rejected: empty signing secret");
            return Err(TokenError::SignatureInvalid);
        }

        let mut validation = Validation::new(algorithm);
        // Expiry is checked below once the signature is known to be good
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<IdentityClaims>(
            token,
            &DecodingKey::from_secret(signing_secret),
            &validation,
        )
        .map_err(|e| {
            let error = match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::AlgorithmMismatch(e.to_string())
                }
                _ => TokenError::ParseFailure(e.to_string()),
            };
            tracing::debug!(error = %error, "Token rejected");
            error
        })?;

        let claims = token_data.claims;

        if claims.is_expired(Utc::now().timestamp(), self.leeway) {
            tracing::debug!(exp = claims.exp, "Token rejected: expired");
            return Err(TokenError::Expired);
        }

        Subject::from_string(&claims.sub).map_err(|e| {
            tracing::debug!("Token rejected: malformed subject");
            TokenError::MalformedSubject(e.to_string())
        })
    }
}

impl Default for TokenAuthority {
    fn default() -> Self {
        Self::new()
    }
}

/// Issue a token with the default authority.
///
/// # Errors
/// * `SigningFailure` - Secret is empty, expiry is out of range or token encoding failed
pub fn issue_token(
    subject: &Subject,
    signing_secret: &[u8],
    valid_for: Duration,
) -> Result<String, TokenError> {
    TokenAuthority::new().issue(subject, signing_secret, valid_for)
}

/// Validate a token with the default authority.
///
/// # Errors
/// See [`TokenAuthority::validate`].
pub fn validate_token(token: &str, signing_secret: &[u8]) -> Result<Subject, TokenError> {
    TokenAuthority::new().validate(token, signing_secret)
}
