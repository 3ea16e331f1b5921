use crate::error::CipherError;

/// AES block size; also the required IV length.
pub const BLOCK_SIZE: usize = 16;

/// Tracing target for opt-in protocol diagnostics.
pub const DIAGNOSTICS_TARGET: &str = "ecinv::diagnostics";

/// AES variant selected by the configured key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Maps a raw key length to the AES variant that accepts it.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidConfiguration`] for lengths other than 16, 24 or 32.
    pub fn from_key_len(len: usize) -> Result<Self, CipherError> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            other => Err(CipherError::InvalidConfiguration {
                message: format!("Invalid key length {other}, must be 16, 24 or 32 bytes").into(),
                context: Some("Key".into()),
            }),
        }
    }
}

/// How the trailing padding count is treated when opening a payload.
///
/// `Lenient` reproduces the remote service's behaviour: a count larger than the
/// buffer leaves the buffer untouched and a zero count strips nothing.
/// `Strict` rejects anything that is not well-formed padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnpadPolicy {
    #[default]
    Lenient,
    Strict,
}
