use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use super::params::HashingParams;

/// Credential hashing implementation.
///
/// Produces self-describing PHC strings (Argon2id, version, work factor,
/// salt and digest) that carry everything needed for later verification.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    params: HashingParams,
}

impl PasswordHasher {
    /// Create a hasher with the default work factor.
    pub fn new() -> Self {
        let params = HashingParams::default();
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
            params,
        }
    }

    /// Create a hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `params` - Argon2id memory, iteration and lane counts
    ///
    /// # Errors
    /// * `InvalidParams` - Argon2 rejects the supplied values
    pub fn with_params(params: HashingParams) -> Result<Self, PasswordError> {
        let argon2_params = params.to_argon2()?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params),
            params,
        })
    }

    /// Work factor used for new hashes.
    pub fn params(&self) -> &HashingParams {
        &self.params
    }

    /// Hash a plaintext secret.
    ///
    /// A fresh random salt is drawn for every call, so hashing the same
    /// secret twice never yields the same string.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to hash
    ///
    /// # Returns
    /// PHC string format hash
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is zero-length
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, secret: &str) -> Result<String, PasswordError> {
        if secret.is_empty() {
            return Err(PasswordError::EmptySecret);
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::warn!(error = %e, "Credential hashing failed");
                PasswordError::HashingFailed(e.to_string())
            })
    }

    /// Verify a plaintext secret against a stored hash.
    ///
    /// The salt and work factor are read from the stored hash, not from
    /// this hasher, and the digest comparison is constant-time.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to verify
    /// * `hash` - Stored hash in PHC string format
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is zero-length
    /// * `Mismatch` - Wrong secret or unreadable hash
    pub fn verify(&self, secret: &str, hash: &str) -> Result<(), PasswordError> {
        if secret.is_empty() {
            return Err(PasswordError::EmptySecret);
        }

        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::debug!(error = %e, "Stored credential hash is malformed");
            PasswordError::Mismatch
        })?;

        self.argon2
            .verify_password(secret.as_bytes(), &parsed_hash)
            .map_err(|_| {
                tracing::debug!("Credential verification failed");
                PasswordError::Mismatch
            })
    }

    /// Check whether a stored hash should be recomputed.
    ///
    /// # Returns
    /// True if the hash is unreadable, not Argon2id, or was produced with
    /// a different work factor than this hasher's.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return true;
        };

        if parsed_hash.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        match Params::try_from(&parsed_hash) {
            Ok(stored) => HashingParams::from(&stored) != self.params,
            Err(_) => true,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a secret with the default work factor.
///
/// # Errors
/// * `EmptySecret` - Secret is zero-length
/// * `HashingFailed` - Password hashing operation failed
pub fn hash_secret(secret: &str) -> Result<String, PasswordError> {
    PasswordHasher::new().hash(secret)
}

/// Verify a secret against a stored hash.
///
/// # Errors
/// * `EmptySecret` - Secret is zero-length
/// * `Mismatch` - Wrong secret or unreadable hash
pub fn verify_secret(secret: &str, hash: &str) -> Result<(), PasswordError> {
    PasswordHasher::new().verify(secret, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(HashingParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));

        hasher
            .verify(password, &hash)
            .expect("Failed to verify password");

        assert_eq!(
            hasher.verify("wrong_password", &hash),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_hash_empty_secret() {
        let hasher = cheap_hasher();
        assert_eq!(hasher.hash(""), Err(PasswordError::EmptySecret));
    }

    #[test]
    fn test_verify_empty_secret() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("password123").expect("Failed to hash password");

        assert_eq!(hasher.verify("", &hash), Err(PasswordError::EmptySecret));
        assert_eq!(
            hasher.verify("", "invalid_hash"),
            Err(PasswordError::EmptySecret)
        );
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = cheap_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert_eq!(result, Err(PasswordError::Mismatch));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = cheap_hasher();
        let first = hasher.hash("password123").expect("Failed to hash password");
        let second = hasher.hash("password123").expect("Failed to hash password");

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_uses_params_from_stored_hash() {
        let old = cheap_hasher();
        let hash = old.hash("password123").expect("Failed to hash password");

        let current = PasswordHasher::with_params(HashingParams {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .expect("Failed to build hasher");

        current
            .verify("password123", &hash)
            .expect("Hash from older params should still verify");
        assert!(current.needs_rehash(&hash));
        assert!(!old.needs_rehash(&hash));
    }

    #[test]
    fn test_needs_rehash_for_garbage() {
        let hasher = cheap_hasher();
        assert!(hasher.needs_rehash("not-a-phc-string"));
    }
}
