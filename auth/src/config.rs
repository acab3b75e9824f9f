use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::jwt::DEFAULT_ISSUER;
use crate::password::HashingParams;

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub hashing: HashingParams,
    pub token: TokenConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: i64,
    #[serde(default)]
    pub leeway_seconds: u64,
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_expiration_seconds() -> i64 {
    3600
}

impl TokenConfig {
    /// Lifetime of issued tokens.
    ///
    /// # Errors
    /// * `Message` - `expiration_seconds` does not fit a duration
    pub fn expiration(&self) -> Result<Duration, ConfigError> {
        Duration::try_seconds(self.expiration_seconds).ok_or_else(|| {
            ConfigError::Message(format!(
                "token.expiration_seconds out of range: {}",
                self.expiration_seconds
            ))
        })
    }
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__TOKEN__SECRET, AUTH__HASHING__MEMORY_KIB, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_config(layered()?)
    }

    /// Load only the hashing work factor, using the same sources as `load`.
    ///
    /// Succeeds without a token section, so hashing tools need no signing secret.
    pub fn load_hashing() -> Result<HashingParams, ConfigError> {
        hashing_from_config(&layered()?)
    }

    fn from_config(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: AuthConfig = configuration.try_deserialize()?;

        if config.token.secret.is_empty() {
            return Err(ConfigError::Message(
                "token.secret must not be empty".to_string(),
            ));
        }
        config.token.expiration()?;

        Ok(config)
    }
}

fn layered() -> Result<ConfigBuilder, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

    ConfigBuilder::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
        .add_source(environment())
        .build()
}

// Example: AUTH__TOKEN__SECRET=... overrides token.secret
fn environment() -> Environment {
    Environment::with_prefix("AUTH")
        .separator("__")
        .try_parsing(true)
}

fn hashing_from_config(configuration: &ConfigBuilder) -> Result<HashingParams, ConfigError> {
    match configuration.get::<HashingParams>("hashing") {
        Ok(params) => Ok(params),
        Err(ConfigError::NotFound(_)) => Ok(HashingParams::default()),
        Err(e) => Err(e),
    }
}
