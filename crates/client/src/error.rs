//! # Client Errors
//!
//! [`ClientError`] is the single classified error channel of the client. Each
//! variant maps to one taxonomy code returned by [`ClientError::code`]:
//!
//! | Variant      | Code               | Raised when                                      |
//! |--------------|--------------------|--------------------------------------------------|
//! | `Validation` | `VALIDATION_ERROR` | client configuration or caller input is unusable |
//! | `Request`    | `REQUEST_ERROR`    | the request cannot be serialized or built        |
//! | `Network`    | `NETWORK_ERROR`    | the remote host cannot be reached in time        |
//! | `Response`   | `RESPONSE_ERROR`   | the response body cannot be read                 |
//! | `Parse`      | `PARSE_ERROR`      | an envelope or payload is not the expected JSON  |
//! | `Api`        | `API_ERROR`        | a transport or business status is not `1`        |
//! | `Crypto`     | `CRYPTO_ERROR`     | the envelope cipher fails                        |

use ecinv_cipher::CipherError;
use std::borrow::Cow;

#[ecinv_derive::ecinv_error]
pub enum ClientError {
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Request error{}: {message}", format_context(.context))]
    Request { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Network error{}: {message}", format_context(.context))]
    Network { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Response error{}: {message}", format_context(.context))]
    Response { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Remote status failure; displays as `"{message} (Code: {code})"`.
    #[error("{message} (Code: {code}){}", format_context(.context))]
    Api { message: Cow<'static, str>, code: i64, context: Option<Cow<'static, str>> },

    #[error("Crypto error{}: {source}", format_context(.context))]
    Crypto { source: CipherError, context: Option<Cow<'static, str>> },
}

impl ClientError {
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub fn api(message: impl Into<Cow<'static, str>>, code: i64) -> Self {
        Self::Api { message: message.into(), code, context: None }
    }

    /// Classifies a transport error by the stage it failed in.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        let message = Cow::Owned(err.to_string());
        if err.is_builder() {
            Self::Request { message, context: None }
        } else if err.is_body() || err.is_decode() {
            Self::Response { message, context: None }
        } else {
            Self::Network { message, context: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::api("Invalid signature", 0);

        assert_eq!(err.to_string(), "Invalid signature (Code: 0)");
        assert_eq!(err.code(), "API_ERROR");
    }

    #[test]
    fn test_taxonomy_codes() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let cases = [
            (ClientError::validation("x"), "VALIDATION_ERROR"),
            (ClientError::Request { message: "x".into(), context: None }, "REQUEST_ERROR"),
            (ClientError::Network { message: "x".into(), context: None }, "NETWORK_ERROR"),
            (ClientError::Response { message: "x".into(), context: None }, "RESPONSE_ERROR"),
            (ClientError::from(parse), "PARSE_ERROR"),
            (
                ClientError::from(CipherError::Padding { message: "x".into(), context: None }),
                "CRYPTO_ERROR",
            ),
        ];

        for (err, code) in cases {
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_context_is_rendered() {
        let result: Result<(), _> = Err(ClientError::validation("merchant id is empty"));
        let err = result.context("Client").unwrap_err();

        assert_eq!(err.to_string(), "Validation error (Client): merchant id is empty");
    }
}
