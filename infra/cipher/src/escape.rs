//! Query-style escape transform applied to plaintext before encryption.
//!
//! Bytes outside `A-Z a-z 0-9 - _ . ~` become `%XX` with uppercase hex and a
//! space becomes `+`. The transform is byte oriented, so non UTF-8 payloads
//! survive a round trip unchanged.

use crate::error::CipherError;

/// Escapes arbitrary bytes into a transport-safe ASCII string.
#[must_use]
pub fn escape(data: &[u8]) -> String {
    // `%` itself is always encoded as `%25`, so every `%20` here stands for a space.
    urlencoding::encode_binary(data).replace("%20", "+")
}

/// Reverses [`escape`].
///
/// # Errors
/// Returns [`CipherError::Escape`] when a `%` is not followed by two hex digits.
pub fn unescape(escaped: &[u8]) -> Result<Vec<u8>, CipherError> {
    check_sequences(escaped)?;

    let spaced: Vec<u8> = escaped.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
    Ok(urlencoding::decode_binary(&spaced).into_owned())
}

fn check_sequences(escaped: &[u8]) -> Result<(), CipherError> {
    let mut pos = 0;
    while pos < escaped.len() {
        if escaped[pos] != b'%' {
            pos += 1;
            continue;
        }

        match escaped.get(pos + 1..pos + 3) {
            Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => pos += 3,
            _ => {
                return Err(CipherError::Escape {
                    message: format!("Malformed escape sequence at offset {pos}").into(),
                    context: None,
                });
            },
        }
    }
    Ok(())
}
