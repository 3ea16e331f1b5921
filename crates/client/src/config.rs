use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `ECINV__CLIENT__MERCHANT_ID`.
pub const ENV_PREFIX: &str = "ECINV";

#[ecinv_derive::ecinv_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration structure from an optional file overlaid with environment variables.
///
/// 1. **File**: when `path` is given it must exist; the format follows the extension
///    (`.toml`, `.json`, `.yaml`).
/// 2. **Environment**: variables prefixed with `ECINV__` override file values. Nested
///    keys use double underscores (`ECINV__CLIENT__HASH_KEY` maps to `client.hash_key`).
///
/// Fields absent from both sources take their serde defaults.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or unreadable, or if the
/// merged values do not match `T`.
///
/// # Example
/// ```rust
/// use ecinv_client::config::load_config;
/// use ecinv_domain::config::AppConfig;
///
/// let config: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// assert_eq!(config.client.timeout_secs, 30);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = path {
        let path = path.as_ref();
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
