use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::subject::Subject;

/// Claim set carried by an identity token.
///
/// Only `sub` is handed back to callers after validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Issuer
    pub iss: String,

    /// Subject (canonical UUID string)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl IdentityClaims {
    /// Build claims for a subject, valid from `issued_at` for `valid_for`.
    ///
    /// `valid_for` may be negative, which yields claims that are
    /// already expired.
    ///
    /// # Returns
    /// None if the expiry falls outside the representable date range
    pub fn new(
        issuer: impl ToString,
        subject: &Subject,
        issued_at: DateTime<Utc>,
        valid_for: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(valid_for)?;

        Some(Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if the claims are expired, allowing `leeway` seconds of skew.
    ///
    /// A token is expired from the second named by `exp` onwards.
    pub fn is_expired(&self, current_timestamp: i64, leeway: u64) -> bool {
        let leeway = i64::try_from(leeway).unwrap_or(i64::MAX);
        self.exp.saturating_add(leeway) <= current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let subject = Subject::new();
        let now = Utc::now();
        let claims = IdentityClaims::new("chirpy", &subject, now, Duration::hours(24))
            .expect("Expiry should be in range");

        assert_eq!(claims.iss, "chirpy");
        assert_eq!(claims.sub, subject.to_string());
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_negative_duration_expires_before_issue() {
        let claims =
            IdentityClaims::new("chirpy", &Subject::new(), Utc::now(), Duration::hours(-1))
                .expect("Expiry should be in range");

        assert_eq!(claims.exp - claims.iat, -3600);
        assert!(claims.is_expired(claims.iat, 0));
    }

    #[test]
    fn test_out_of_range_expiry() {
        let now = Utc::now();
        let subject = Subject::new();

        assert!(IdentityClaims::new("chirpy", &subject, now, Duration::days(100_000_000)).is_none());
        assert!(IdentityClaims::new("chirpy", &subject, now, Duration::days(-100_000_000)).is_none());
    }

    #[test]
    fn test_is_expired() {
        let claims = IdentityClaims {
            iss: "chirpy".to_string(),
            sub: Subject::new().to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999, 0)); // Not expired
        assert!(claims.is_expired(1000, 0)); // Exactly at expiration
        assert!(claims.is_expired(1001, 0)); // Expired
        assert!(!claims.is_expired(1030, 60)); // Within leeway
        assert!(claims.is_expired(1060, 60)); // Leeway used up
    }

    #[test]
    fn test_serialized_claim_names() {
        let claims = IdentityClaims {
            iss: "chirpy".to_string(),
            sub: "67e55044-10b1-426f-9247-bb680e5fe0c8".to_string(),
            iat: 10,
            exp: 20,
        };

        let json = serde_json::to_value(&claims).expect("Failed to serialize claims");
        assert_eq!(json["iss"], "chirpy");
        assert_eq!(json["sub"], "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(json["iat"], 10);
        assert_eq!(json["exp"], 20);
    }
}
