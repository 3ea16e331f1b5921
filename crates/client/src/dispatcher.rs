use ecinv_cipher::{DIAGNOSTICS_TARGET, EnvelopeCipher};
use ecinv_domain::envelope::ResponseEnvelope;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::envelope::EnvelopeBuilder;
use crate::error::{ClientError, ClientErrorExt};

/// Performs one envelope exchange per call:
/// build, serialize, POST, read, parse, check `TransCode`, open `Data`.
///
/// Every step returns on the first failure. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    base_url: String,
    envelopes: EnvelopeBuilder,
    cipher: EnvelopeCipher,
    diagnostics: bool,
}

impl Dispatcher {
    /// # Errors
    /// Returns [`ClientError::Request`] if the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        envelopes: EnvelopeBuilder,
        cipher: EnvelopeCipher,
        diagnostics: bool,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            ClientError::Request { message: e.to_string().into(), context: Some("HTTP client".into()) }
        })?;

        Ok(Self { http, base_url: base_url.into(), envelopes, cipher, diagnostics })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `payload` to `route` and returns the decrypted response payload.
    ///
    /// # Errors
    /// * [`ClientError::Request`] If the envelope or HTTP request cannot be built.
    /// * [`ClientError::Network`] If the host cannot be reached or the timeout expires.
    /// * [`ClientError::Response`] If the response body cannot be read.
    /// * [`ClientError::Parse`] If the body is not a response envelope.
    /// * [`ClientError::Api`] If `TransCode` is not `1`. `Data` is left untouched.
    /// * [`ClientError::Crypto`] If `Data` cannot be opened.
    pub async fn execute<T: Serialize + ?Sized>(
        &self,
        route: &str,
        payload: &T,
    ) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}{route}", self.base_url);

        let envelope = self.envelopes.build(payload)?;
        let body = serde_json::to_vec(&envelope).map_err(|e| ClientError::Request {
            message: e.to_string().into(),
            context: Some("Envelope serialization".into()),
        })?;

        if self.diagnostics {
            debug!(
                target: DIAGNOSTICS_TARGET,
                url = %url,
                body = %String::from_utf8_lossy(&body),
                "Sending request envelope"
            );
        }

        let request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
            .map_err(|e| ClientError::from_transport(&e))?;

        let response = self.http.execute(request).await.map_err(|e| {
            warn!(route, error = %e, "Request envelope not delivered");
            ClientError::from_transport(&e)
        })?;

        let status = response.status();
        debug!(route, %status, "Response received");

        let bytes = response.bytes().await.map_err(|e| ClientError::Response {
            message: e.to_string().into(),
            context: Some(route.to_owned().into()),
        })?;

        if self.diagnostics {
            debug!(
                target: DIAGNOSTICS_TARGET,
                body = %String::from_utf8_lossy(&bytes),
                "Response envelope received"
            );
        }

        let envelope: ResponseEnvelope =
            serde_json::from_slice(&bytes).context("Response envelope")?;

        if !envelope.is_success() {
            return Err(ClientError::api(envelope.trans_msg, envelope.trans_code));
        }

        let plaintext = self.cipher.open(&envelope.data)?;

        if self.diagnostics {
            debug!(
                target: DIAGNOSTICS_TARGET,
                payload = %String::from_utf8_lossy(&plaintext),
                "Response payload decrypted"
            );
        }

        Ok(plaintext)
    }
}
