use std::env;

use anyhow::bail;
use anyhow::Context;
use chirpy_auth::config::AuthConfig;
use chirpy_auth::PasswordHasher;
use chirpy_auth::Subject;
use chirpy_auth::TokenAuthority;
use chrono::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const USAGE: &str = "usage:
  authctl hash <secret>
  authctl verify <secret> <hash>
  authctl issue <subject-uuid> [seconds]
  authctl validate <token>";

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy_auth=info,authctl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{}", USAGE);
    };

    match (command.as_str(), &args[1..]) {
        ("hash", [plaintext]) => {
            let hasher = load_hasher()?;
            println!("{}", hasher.hash(plaintext)?);
        }
        ("verify", [plaintext, hash]) => {
            let hasher = load_hasher()?;
            hasher.verify(plaintext, hash)?;
            if hasher.needs_rehash(hash) {
                tracing::warn!("Hash was produced with outdated parameters");
            }
            println!("ok");
        }
        ("issue", [subject, rest @ ..]) if rest.len() <= 1 => {
            let config = load_config()?;
            let subject: Subject = subject.parse()?;
            let valid_for = match rest.first() {
                Some(value) => {
                    let seconds = value
                        .parse::<i64>()
                        .with_context(|| format!("Invalid duration: {}", value))?;
                    Duration::try_seconds(seconds)
                        .with_context(|| format!("Duration out of range: {}", value))?
                }
                None => config.token.expiration()?,
            };
            println!(
                "{}",
                authority(&config).issue(&subject, config.token.secret.as_bytes(), valid_for)?
            );
        }
        ("validate", [token]) => {
            let config = load_config()?;
            println!(
                "{}",
                authority(&config).validate(token, config.token.secret.as_bytes())?
            );
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}

fn load_hasher() -> Result<PasswordHasher, anyhow::Error> {
    let params = AuthConfig::load_hashing().context("Failed to load hashing configuration")?;
    tracing::debug!(
        memory_kib = params.memory_kib,
        iterations = params.iterations,
        parallelism = params.parallelism,
        "Hashing configuration loaded"
    );

    Ok(PasswordHasher::with_params(params)?)
}

fn load_config() -> Result<AuthConfig, anyhow::Error> {
    let config = AuthConfig::load().context("Failed to load configuration")?;
    tracing::debug!(
        issuer = %config.token.issuer,
        expiration_seconds = config.token.expiration_seconds,
        leeway_seconds = config.token.leeway_seconds,
        "Configuration loaded"
    );

    Ok(config)
}

fn authority(config: &AuthConfig) -> TokenAuthority {
    let authority = TokenAuthority::new()
        .with_issuer(&config.token.issuer)
        .with_leeway(config.token.leeway_seconds);
    tracing::debug!(issuer = authority.issuer(), "Token authority ready");

    authority
}
