use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

use super::errors::TokenError;

/// Header fields read before the token is trusted.
///
/// `alg` is kept as a raw string so that values the signature library has
/// no variant for (such as `none`) are still reported as an algorithm
/// mismatch rather than a parse error.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// Read the declared signing algorithm from a compact token.
///
/// # Returns
/// The HMAC algorithm the token claims to be signed with
///
/// # Errors
/// * `ParseFailure` - Token is not three segments or the header is not base64url JSON
/// * `AlgorithmMismatch` - Header names anything outside the HMAC family
pub(crate) fn hmac_algorithm(token: &str) -> Result<Algorithm, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::ParseFailure(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| TokenError::ParseFailure(format!("header is not base64url: {}", e)))?;

    let raw: RawHeader = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::ParseFailure(format!("header is not valid JSON: {}", e)))?;

    match raw.alg.as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(TokenError::AlgorithmMismatch(other.to_string())),
    }
}
