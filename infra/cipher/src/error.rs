//! # Cipher Errors
//!
//! This module defines the [`CipherError`] enum used by every envelope
//! cryptography operation. Callers higher up classify all of these as crypto failures.

use std::borrow::Cow;

/// A specialized [`CipherError`] enum for envelope cryptography failures.
#[ecinv_derive::ecinv_error]
pub enum CipherError {
    /// The key or IV cannot drive the block cipher (wrong length).
    #[error("Invalid cipher configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The sealed text is not valid standard base64.
    #[error("Encoding error{}: {source}", format_context(.context))]
    Encoding { source: base64::DecodeError, context: Option<Cow<'static, str>> },

    /// The cipher text cannot be decrypted in CBC mode.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Padding rejected under the strict unpadding policy.
    #[error("Padding error{}: {message}", format_context(.context))]
    Padding { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Malformed `%XX` sequence while reversing the escape transform.
    #[error("Escape error{}: {message}", format_context(.context))]
    Escape { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
