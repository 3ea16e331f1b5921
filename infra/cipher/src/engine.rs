use aes::{Aes128, Aes192, Aes256};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

use crate::builder::CipherBuilder;
use crate::error::{CipherError, CipherErrorExt};
use crate::types::{BLOCK_SIZE, DIAGNOSTICS_TARGET, KeySize, UnpadPolicy};
use crate::{escape, padding};

/// Runs `$body` with `$alg` bound to the AES type matching `$size`.
macro_rules! with_aes {
    ($size:expr, $alg:ident => $body:expr) => {
        match $size {
            KeySize::Aes128 => {
                type $alg = Aes128;
                $body
            },
            KeySize::Aes192 => {
                type $alg = Aes192;
                $body
            },
            KeySize::Aes256 => {
                type $alg = Aes256;
                $body
            },
        }
    };
}

/// Immutable secret material and settings shared by every clone of the cipher.
pub(crate) struct CipherInner {
    pub(crate) key: Zeroizing<Vec<u8>>,
    pub(crate) iv: Zeroizing<[u8; BLOCK_SIZE]>,
    pub(crate) key_size: KeySize,
    pub(crate) policy: UnpadPolicy,
    pub(crate) diagnostics: bool,
}

impl std::fmt::Debug for CipherInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherInner")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .field("key_size", &self.key_size)
            .field("policy", &self.policy)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

/// The envelope cipher used for the `Data` field of every request and response.
///
/// Sealing runs escape, pad, AES-CBC with the fixed key and IV, then base64.
/// Opening runs the same steps in reverse. There is no per-call randomness: the
/// static IV is part of the remote protocol.
///
/// The cipher is an [`Arc`] around read-only state, so clones are cheap and may be
/// used from any number of threads at once.
///
/// ### Example
/// ```rust
/// use ecinv_cipher::{CipherError, EnvelopeCipher};
///
/// # fn main() -> Result<(), CipherError> {
/// let cipher = EnvelopeCipher::builder()
///     .secret("ejCk326UnaZWKisg", "q9jcZX8Ib9LM8wYk")
///     .build()?;
///
/// let sealed = cipher.seal(br#"{"RelateNumber":"ORD001"}"#)?;
/// let opened = cipher.open(&sealed)?;
/// assert_eq!(opened, br#"{"RelateNumber":"ORD001"}"#);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeCipher {
    pub(crate) inner: Arc<CipherInner>,
}

impl EnvelopeCipher {
    /// Returns a new [`CipherBuilder`].
    #[must_use]
    pub fn builder() -> CipherBuilder {
        CipherBuilder::new()
    }

    /// AES variant chosen from the configured key length.
    #[must_use]
    pub fn key_size(&self) -> KeySize {
        self.inner.key_size
    }

    /// Active unpadding policy.
    #[must_use]
    pub fn unpad_policy(&self) -> UnpadPolicy {
        self.inner.policy
    }

    /// Escapes, pads, encrypts and base64-encodes `plaintext`.
    ///
    /// # Errors
    /// * [`CipherError::InvalidConfiguration`] If the block cipher cannot be constructed.
    pub fn seal(&self, plaintext: impl AsRef<[u8]>) -> Result<String, CipherError> {
        let plaintext = plaintext.as_ref();
        let escaped = escape::escape(plaintext);
        let padded = padding::pad(escaped.as_bytes());

        let cipher_text = self.encrypt_blocks(&padded)?;
        let sealed = STANDARD.encode(cipher_text);

        if self.inner.diagnostics {
            debug!(
                target: DIAGNOSTICS_TARGET,
                plaintext_len = plaintext.len(),
                escaped = %escaped,
                sealed = %sealed,
                "Envelope payload sealed"
            );
        }

        Ok(sealed)
    }

    /// Decodes, decrypts, unpads and unescapes a sealed payload.
    ///
    /// # Errors
    /// * [`CipherError::Encoding`] If `sealed` is not valid base64.
    /// * [`CipherError::Decryption`] If the decoded length is not a whole number of blocks.
    /// * [`CipherError::Padding`] If the strict policy rejects the padding.
    /// * [`CipherError::Escape`] If the decrypted text holds a malformed escape sequence.
    pub fn open(&self, sealed: &str) -> Result<Vec<u8>, CipherError> {
        let cipher_text = STANDARD.decode(sealed.trim()).context("Base64 decoding failed")?;

        let padded = Zeroizing::new(self.decrypt_blocks(&cipher_text)?);
        let escaped = padding::unpad(&padded, self.inner.policy)?;
        let plaintext = escape::unescape(escaped)?;

        if self.inner.diagnostics {
            debug!(target: DIAGNOSTICS_TARGET, plaintext_len = plaintext.len(), "Envelope payload opened");
        }

        Ok(plaintext)
    }

    fn encrypt_blocks(&self, padded: &[u8]) -> Result<Vec<u8>, CipherError> {
        let (key, iv) = (self.inner.key.as_slice(), self.inner.iv.as_slice());

        with_aes!(self.inner.key_size, Alg => {
            let encryptor = cbc::Encryptor::<Alg>::new_from_slices(key, iv)
                .map_err(|_| construction_error("encryptor"))?;
            Ok(encryptor.encrypt_padded_vec_mut::<NoPadding>(padded))
        })
    }

    fn decrypt_blocks(&self, cipher_text: &[u8]) -> Result<Vec<u8>, CipherError> {
        if cipher_text.len() % BLOCK_SIZE != 0 {
            return Err(CipherError::Decryption {
                message: format!(
                    "Cipher text length {} is not a multiple of {BLOCK_SIZE}",
                    cipher_text.len()
                )
                .into(),
                context: None,
            });
        }

        let (key, iv) = (self.inner.key.as_slice(), self.inner.iv.as_slice());

        with_aes!(self.inner.key_size, Alg => {
            let decryptor = cbc::Decryptor::<Alg>::new_from_slices(key, iv)
                .map_err(|_| construction_error("decryptor"))?;
            decryptor.decrypt_padded_vec_mut::<NoPadding>(cipher_text).map_err(|_| {
                CipherError::Decryption {
                    message: "Block decryption failed".into(),
                    context: Some("CBC".into()),
                }
            })
        })
    }

    /// Encrypts already block-aligned bytes without escaping or padding.
    #[cfg(test)]
    pub(crate) fn encrypt_raw(&self, blocks: &[u8]) -> Result<String, CipherError> {
        Ok(STANDARD.encode(self.encrypt_blocks(blocks)?))
    }
}

fn construction_error(role: &'static str) -> CipherError {
    CipherError::InvalidConfiguration {
        message: "Key or IV length rejected by the block cipher".into(),
        context: Some(role.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    const KEY: &str = "ejCk326UnaZWKisg";
    const IV: &str = "q9jcZX8Ib9LM8wYk";

    fn cipher(policy: UnpadPolicy) -> EnvelopeCipher {
        EnvelopeCipher::builder().secret(KEY, IV).unpad_policy(policy).build().unwrap()
    }

    #[test]
    fn test_seal_open_single_char() {
        let cipher = cipher(UnpadPolicy::Lenient);
        let sealed = cipher.seal(b"A").unwrap();
        assert_eq!(cipher.open(&sealed).unwrap(), b"A");
    }

    #[test]
    fn test_sealed_length_is_block_multiple() {
        let cipher = cipher(UnpadPolicy::Lenient);
        for len in [0usize, 1, 15, 16, 17, 48] {
            let sealed = cipher.seal(vec![b'x'; len]).unwrap();
            let raw = STANDARD.decode(sealed).unwrap();
            assert_eq!(raw.len() % BLOCK_SIZE, 0);
            assert_eq!(raw.len(), (len / BLOCK_SIZE + 1) * BLOCK_SIZE);
        }
    }

    #[test]
    fn test_seal_is_deterministic() {
        let cipher = cipher(UnpadPolicy::Lenient);
        assert_eq!(cipher.seal(b"same").unwrap(), cipher.seal(b"same").unwrap());
    }

    #[test]
    fn test_oversized_pad_count_passes_through_when_lenient() {
        let cipher = cipher(UnpadPolicy::Lenient);
        let mut block = b"ABCDEFGHIJKLMNO".to_vec();
        block.push(0xFF);

        let sealed = cipher.encrypt_raw(&block).unwrap();
        let opened = cipher.open(&sealed).unwrap();

        assert_eq!(opened, block);
    }

    #[test]
    fn test_oversized_pad_count_rejected_when_strict() {
        let cipher = cipher(UnpadPolicy::Strict);
        let mut block = b"ABCDEFGHIJKLMNO".to_vec();
        block.push(0xFF);

        let sealed = cipher.encrypt_raw(&block).unwrap();
        assert!(matches!(cipher.open(&sealed), Err(CipherError::Padding { .. })));
    }

    #[test]
    fn test_open_rejects_partial_block() {
        let cipher = cipher(UnpadPolicy::Lenient);
        let sealed = STANDARD.encode([0u8; 10]);
        assert!(matches!(cipher.open(&sealed), Err(CipherError::Decryption { .. })));
    }

    #[test]
    fn test_open_rejects_invalid_base64() {
        let cipher = cipher(UnpadPolicy::Lenient);
        assert!(matches!(cipher.open("not base64!"), Err(CipherError::Encoding { .. })));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", cipher(UnpadPolicy::Lenient));
        assert!(!rendered.contains(KEY));
        assert!(!rendered.contains(IV));
        assert!(rendered.contains("[REDACTED]"));
    }
}
