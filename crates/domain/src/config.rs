use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Base URL of the production service.
pub const PRODUCTION_URL: &str = "https://einvoice.ecpay.com.tw";
/// Base URL of the staging service.
pub const STAGING_URL: &str = "https://einvoice-stage.ecpay.com.tw";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration of the command line application.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub log: LogConfig,
}

/// Target environment of the remote service.
///
/// `production` and `staging` (alias `stage`) are the recognised values; any other
/// string is used verbatim as a base URL, which is how tests point at a mock server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    #[serde(alias = "stage")]
    Staging,
    #[serde(untagged)]
    Custom(String),
}

impl Environment {
    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Staging => STAGING_URL,
            Self::Custom(url) => url.trim_end_matches('/'),
        }
    }
}

/// Secret material and transport settings of one merchant.
///
/// The `hash_key` / `hash_iv` pair is issued by the remote service; `Debug`
/// output never shows it.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub merchant_id: String,
    pub hash_key: String,
    pub hash_iv: String,
    pub environment: Environment,
    pub timeout_secs: u64,
    pub debug: bool,
    pub strict_padding: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            merchant_id: String::new(),
            hash_key: String::new(),
            hash_iv: String::new(),
            environment: Environment::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
            strict_padding: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("merchant_id", &self.merchant_id)
            .field("hash_key", &"[REDACTED]")
            .field("hash_iv", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("timeout_secs", &self.timeout_secs)
            .field("debug", &self.debug)
            .field("strict_padding", &self.strict_padding)
            .finish()
    }
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub filter: Option<String>,
    pub console: bool,
    pub json: bool,
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, console: true, json: false, directory: None }
    }
}
