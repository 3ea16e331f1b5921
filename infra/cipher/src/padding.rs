//! Length-prefix block padding.
//!
//! Every padded buffer ends with `n` copies of the byte `n`, where `n` is in
//! `1..=BLOCK_SIZE`. Block-aligned input receives a full extra block.

use crate::error::CipherError;
use crate::types::{BLOCK_SIZE, UnpadPolicy};
use tracing::warn;

/// Pads `data` up to the next multiple of [`BLOCK_SIZE`].
#[must_use]
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    // pad_len is within 1..=16
    #[allow(clippy::cast_possible_truncation)]
    let pad_byte = pad_len as u8;

    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_byte);
    out
}

/// Strips the padding announced by the trailing byte.
///
/// # Errors
/// Only the [`UnpadPolicy::Strict`] policy fails, with [`CipherError::Padding`].
pub fn unpad(data: &[u8], policy: UnpadPolicy) -> Result<&[u8], CipherError> {
    match policy {
        UnpadPolicy::Lenient => Ok(unpad_lenient(data)),
        UnpadPolicy::Strict => unpad_strict(data),
    }
}

fn unpad_lenient(data: &[u8]) -> &[u8] {
    let Some(&last) = data.last() else {
        return data;
    };

    let count = usize::from(last);
    if count > data.len() {
        warn!(count, len = data.len(), "Padding count exceeds buffer, leaving payload untouched");
        return data;
    }

    &data[..data.len() - count]
}

fn unpad_strict(data: &[u8]) -> Result<&[u8], CipherError> {
    let Some(&last) = data.last() else {
        return Err(CipherError::Padding { message: "Empty buffer carries no padding".into(), context: None });
    };

    let count = usize::from(last);
    if count == 0 || count > BLOCK_SIZE || count > data.len() {
        return Err(CipherError::Padding {
            message: format!("Padding count {count} out of range for {} bytes", data.len()).into(),
            context: None,
        });
    }

    let (content, padding) = data.split_at(data.len() - count);
    if padding.iter().any(|&b| b != last) {
        return Err(CipherError::Padding {
            message: "Padding bytes do not match the padding count".into(),
            context: None,
        });
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_partial_block() {
        let padded = pad(b"abc");
        assert_eq!(padded.len(), BLOCK_SIZE);
        assert!(padded[3..].iter().all(|&b| b == 13));
    }

    #[test]
    fn test_pad_aligned_input_gets_full_block() {
        let padded = pad(&[b'x'; BLOCK_SIZE]);
        assert_eq!(padded.len(), 2 * BLOCK_SIZE);
        assert!(padded[BLOCK_SIZE..].iter().all(|&b| usize::from(b) == BLOCK_SIZE));
    }

    #[test]
    fn test_pad_empty_input() {
        assert_eq!(pad(b""), vec![16u8; BLOCK_SIZE]);
    }

    #[test]
    fn test_unpad_roundtrip_both_policies() {
        let padded = pad(b"hello");
        assert_eq!(unpad(&padded, UnpadPolicy::Lenient).unwrap(), b"hello");
        assert_eq!(unpad(&padded, UnpadPolicy::Strict).unwrap(), b"hello");
    }

    #[test]
    fn test_lenient_passes_through_oversized_count() {
        let mut data = vec![b'a'; 15];
        data.push(200);
        assert_eq!(unpad(&data, UnpadPolicy::Lenient).unwrap(), data.as_slice());
    }

    #[test]
    fn test_lenient_zero_count_and_empty_are_noops() {
        let data = [b'a', b'b', 0];
        assert_eq!(unpad(&data, UnpadPolicy::Lenient).unwrap(), &data);
        assert!(unpad(&[], UnpadPolicy::Lenient).unwrap().is_empty());
    }

    #[test]
    fn test_strict_rejects_malformed_padding() {
        let mut oversized = vec![b'a'; 15];
        oversized.push(200);
        assert!(matches!(unpad(&oversized, UnpadPolicy::Strict), Err(CipherError::Padding { .. })));

        let mut mismatched = vec![b'a'; 13];
        mismatched.extend_from_slice(&[1, 2, 3]);
        assert!(matches!(unpad(&mismatched, UnpadPolicy::Strict), Err(CipherError::Padding { .. })));

        assert!(unpad(&[b'a', 0], UnpadPolicy::Strict).is_err());
        assert!(unpad(&[], UnpadPolicy::Strict).is_err());
    }
}
