pub mod authority;
pub mod bearer;
pub mod claims;
pub mod errors;
mod header;

pub use authority::issue_token;
pub use authority::validate_token;
pub use authority::TokenAuthority;
pub use authority::DEFAULT_ISSUER;
pub use bearer::bearer_token;
pub use claims::IdentityClaims;
pub use errors::TokenError;
