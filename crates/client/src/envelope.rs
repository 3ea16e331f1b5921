use chrono::Utc;
use ecinv_cipher::EnvelopeCipher;
use ecinv_domain::envelope::{RequestEnvelope, RequestHeader};
use serde::Serialize;

use crate::error::ClientError;

/// Wraps business payloads into sealed request envelopes for one merchant.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    merchant_id: String,
    cipher: EnvelopeCipher,
}

impl EnvelopeBuilder {
    #[must_use]
    pub fn new(merchant_id: impl Into<String>, cipher: EnvelopeCipher) -> Self {
        Self { merchant_id: merchant_id.into(), cipher }
    }

    #[must_use]
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Builds an envelope stamped with the current wall-clock time.
    ///
    /// # Errors
    /// * [`ClientError::Request`] If the payload cannot be serialized.
    /// * [`ClientError::Crypto`] If sealing fails.
    pub fn build<T: Serialize + ?Sized>(&self, payload: &T) -> Result<RequestEnvelope, ClientError> {
        self.build_at(payload, Utc::now().timestamp())
    }

    /// Builds an envelope with an explicit Unix timestamp in seconds.
    ///
    /// # Errors
    /// See [`EnvelopeBuilder::build`].
    pub fn build_at<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        timestamp: i64,
    ) -> Result<RequestEnvelope, ClientError> {
        let plaintext = serde_json::to_vec(payload).map_err(|e| ClientError::Request {
            message: e.to_string().into(),
            context: Some("Payload serialization".into()),
        })?;

        let data = self.cipher.seal(&plaintext)?;

        Ok(RequestEnvelope {
            merchant_id: self.merchant_id.clone(),
            rq_header: RequestHeader::new(timestamp),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecinv_domain::envelope::PROTOCOL_REVISION;
    use serde_json::json;

    fn builder() -> EnvelopeBuilder {
        let cipher = EnvelopeCipher::builder()
            .secret("ejCk326UnaZWKisg", "q9jcZX8Ib9LM8wYk")
            .build()
            .unwrap();
        EnvelopeBuilder::new("2000132", cipher)
    }

    #[test]
    fn test_build_at_populates_header() {
        let envelope = builder().build_at(&json!({"RelateNumber": "ORD001"}), 1_700_000_000).unwrap();

        assert_eq!(envelope.merchant_id, "2000132");
        assert_eq!(envelope.rq_header.timestamp, 1_700_000_000);
        assert_eq!(envelope.rq_header.revision, PROTOCOL_REVISION);
    }

    #[test]
    fn test_data_opens_to_payload() {
        let builder = builder();
        let payload = json!({"RelateNumber": "ORD001", "CustomerName": "Test User"});

        let envelope = builder.build(&payload).unwrap();
        let opened = builder.cipher.open(&envelope.data).unwrap();

        assert_eq!(serde_json::from_slice::<serde_json::Value>(&opened).unwrap(), payload);
    }

    #[test]
    fn test_timestamps_do_not_decrease() {
        let builder = builder();
        let mut last = 0;
        for _ in 0..5 {
            let envelope = builder.build(&json!({})).unwrap();
            assert!(envelope.rq_header.timestamp >= last);
            last = envelope.rq_header.timestamp;
        }
    }

    #[test]
    fn test_unserializable_payload_is_request_error() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(vec![1u8], "non-string key");

        let err = builder().build(&map).unwrap_err();
        assert_eq!(err.code(), "REQUEST_ERROR");
    }
}
