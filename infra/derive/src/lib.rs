#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the e-invoice client workspace.
//!
//! The only macro exported today is [`macro@ecinv_error`], which every crate uses to
//! declare its error enum so that all failures share the same shape: a message or
//! source, an optional context string, and a stable taxonomy code.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining classified error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * A `<ErrorName>Ext` trait adding `.context(...)` to `Result<T, ErrorName>` and to
///   `Result<T, SourceError>` for every variant that wraps a source.
/// * `From<SourceError>` for variants with a `source` field (or a field marked
///   `#[source]` / `#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * `ErrorName::code(&self) -> &'static str`, the variant name in `SCREAMING_SNAKE`
///   case followed by `_ERROR` (`Api` becomes `API_ERROR`).
/// * A private `format_context` helper for use inside `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an enum with struct variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use ecinv_derive::ecinv_error;
/// use std::borrow::Cow;
///
/// #[ecinv_error]
/// pub enum TransportError {
///     #[error("Parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Network error{}: {message}", format_context(.context))]
///     Network { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn decode(raw: &str) -> Result<serde_json::Value, TransportError> {
///     serde_json::from_str(raw).context("Decoding response envelope")
/// }
///
/// assert_eq!(TransportError::Network { message: "x".into(), context: None }.code(), "NETWORK_ERROR");
/// ```
#[proc_macro_attribute]
pub fn ecinv_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
