//! Client for the e-invoice API.
//!
//! Every call wraps a JSON business payload into a sealed envelope, posts it,
//! checks the transport status and opens the answer:
//!
//! ```text
//! payload -> EnvelopeBuilder -> Dispatcher (POST) -> TransCode == 1 -> open Data -> RtnCode == 1
//! ```
//!
//! Failures surface as [`ClientError`], whose [`code`](ClientError::code) is one of
//! `VALIDATION_ERROR`, `REQUEST_ERROR`, `NETWORK_ERROR`, `RESPONSE_ERROR`,
//! `PARSE_ERROR`, `API_ERROR` or `CRYPTO_ERROR`.
//!
//! ## Example
//! ```rust,no_run
//! use ecinv_client::{Client, generate_relate_number};
//! use ecinv_domain::config::ClientConfig;
//! use ecinv_domain::invoice::QueryInvoiceRequest;
//!
//! # async fn run() -> Result<(), ecinv_client::ClientError> {
//! let client = Client::new(&ClientConfig {
//!     merchant_id: "2000132".to_owned(),
//!     hash_key: "ejCk326UnaZWKisg".to_owned(),
//!     hash_iv: "q9jcZX8Ib9LM8wYk".to_owned(),
//!     ..ClientConfig::default()
//! })?;
//!
//! let request = QueryInvoiceRequest {
//!     relate_number: generate_relate_number("ORD"),
//!     ..QueryInvoiceRequest::default()
//! };
//! let status = client.query_invoice(&request).await?;
//! println!("{:?}", status.status());
//! # Ok(())
//! # }
//! ```

pub mod config;
mod dispatcher;
mod envelope;
mod error;
mod invoice;

pub use dispatcher::Dispatcher;
pub use envelope::EnvelopeBuilder;
pub use error::{ClientError, ClientErrorExt};
pub use invoice::{
    INVOICE_DATE_FORMAT, INVOICE_DATETIME_FORMAT, format_invoice_date, generate_relate_number,
    parse_invoice_date,
};

use ecinv_cipher::{EnvelopeCipher, UnpadPolicy};
use ecinv_domain::config::ClientConfig;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug)]
struct ClientInner {
    merchant_id: String,
    cipher: EnvelopeCipher,
    dispatcher: Dispatcher,
}

/// Configured e-invoice client.
///
/// All state is fixed at construction and shared behind an [`Arc`]; clones are
/// cheap and concurrent calls need no locking.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Builds a client from its configuration.
    ///
    /// # Errors
    /// * [`ClientError::Validation`] If the merchant id is empty, the base URL is not an
    ///   absolute `http`/`https` URL, or the timeout is zero.
    /// * [`ClientError::Crypto`] If the key or IV has an invalid length.
    /// * [`ClientError::Request`] If the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let merchant_id = config.merchant_id.trim();
        if merchant_id.is_empty() {
            return Err(ClientError::validation("Merchant id is empty"));
        }

        let base_url = config.environment.base_url();
        if base_url.is_empty() {
            return Err(ClientError::validation("Base URL is empty"));
        }
        validate_base_url(base_url)?;

        if config.timeout_secs == 0 {
            return Err(ClientError::validation("Timeout must be at least one second"));
        }

        let policy = if config.strict_padding { UnpadPolicy::Strict } else { UnpadPolicy::Lenient };
        let cipher = EnvelopeCipher::builder()
            .secret(&config.hash_key, &config.hash_iv)
            .unpad_policy(policy)
            .diagnostics(config.debug)
            .build()
            .context("Cipher configuration")?;

        let envelopes = EnvelopeBuilder::new(merchant_id, cipher.clone());
        let dispatcher = Dispatcher::new(
            base_url,
            Duration::from_secs(config.timeout_secs),
            envelopes,
            cipher.clone(),
            config.debug,
        )?;

        info!(merchant_id, base_url, ?policy, "E-invoice client ready");

        Ok(Self {
            inner: Arc::new(ClientInner { merchant_id: merchant_id.to_owned(), cipher, dispatcher }),
        })
    }

    #[must_use]
    pub fn merchant_id(&self) -> &str {
        &self.inner.merchant_id
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.dispatcher.base_url()
    }

    /// The envelope cipher, for sealing or opening payloads offline.
    #[must_use]
    pub fn cipher(&self) -> &EnvelopeCipher {
        &self.inner.cipher
    }

    /// Runs one raw exchange and returns the decrypted payload bytes.
    ///
    /// # Errors
    /// See [`Dispatcher::execute`].
    pub async fn execute<T: Serialize + ?Sized>(
        &self,
        route: &str,
        payload: &T,
    ) -> Result<Vec<u8>, ClientError> {
        self.inner.dispatcher.execute(route, payload).await
    }
}

/// Rejects environment values that are neither a known name nor an absolute URL.
fn validate_base_url(base_url: &str) -> Result<(), ClientError> {
    let url = reqwest::Url::parse(base_url).map_err(|e| ClientError::Validation {
        message: format!("Invalid base URL '{base_url}': {e}").into(),
        context: Some("environment".into()),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ClientError::Validation {
            message: format!("Unsupported URL scheme '{other}' in '{base_url}'").into(),
            context: Some("environment".into()),
        }),
    }
}
