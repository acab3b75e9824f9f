pub mod argon2;
pub mod errors;
pub mod params;

pub use self::argon2::hash_secret;
pub use self::argon2::verify_secret;
pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
pub use params::HashingParams;
