use crate::engine::{CipherInner, EnvelopeCipher};
use crate::error::CipherError;
use crate::types::{BLOCK_SIZE, KeySize, UnpadPolicy};
use private::Sealed;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

#[derive(Debug, Default, ZeroizeOnDrop)]
pub struct NoSecret;
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct WithSecret {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl std::fmt::Debug for WithSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithSecret").field("key", &"[REDACTED]").field("iv", &"[REDACTED]").finish()
    }
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoSecret {}
impl Sealed for WithSecret {}

/// A builder for the [`EnvelopeCipher`].
///
/// Implements `ZeroizeOnDrop` so the raw key and IV handed to it are wiped as
/// soon as the builder is consumed or dropped.
#[allow(private_bounds)]
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct CipherBuilder<S: Sealed + ZeroizeOnDrop = NoSecret> {
    #[zeroize(skip)]
    policy: UnpadPolicy,
    diagnostics: bool,
    secret: S,
}

impl Default for CipherBuilder {
    fn default() -> Self {
        Self { policy: UnpadPolicy::default(), diagnostics: false, secret: NoSecret }
    }
}

impl CipherBuilder {
    /// Creates a new empty builder.
    #[must_use = "Builder must be given a key and IV with `secret` before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the shared key and IV agreed with the remote service.
    ///
    /// Lengths are checked by [`CipherBuilder::build`].
    pub fn secret(self, key: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> CipherBuilder<WithSecret> {
        CipherBuilder {
            policy: self.policy,
            diagnostics: self.diagnostics,
            secret: WithSecret { key: key.as_ref().to_vec(), iv: iv.as_ref().to_vec() },
        }
    }
}

#[allow(private_bounds)]
impl<S: Sealed + ZeroizeOnDrop> CipherBuilder<S> {
    /// Selects how padding is stripped when opening payloads.
    #[must_use]
    pub const fn unpad_policy(mut self, policy: UnpadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Emits plaintext length, escaped form and cipher text under
    /// [`DIAGNOSTICS_TARGET`](crate::DIAGNOSTICS_TARGET). Never logs the key or IV.
    #[must_use]
    pub const fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

impl CipherBuilder<WithSecret> {
    /// Validates the secret material and finalizes the cipher.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidConfiguration`] if the key is not 16, 24 or 32
    /// bytes long or the IV is not exactly one block.
    pub fn build(mut self) -> Result<EnvelopeCipher, CipherError> {
        let key_size = KeySize::from_key_len(self.secret.key.len())?;

        let iv: [u8; BLOCK_SIZE] =
            self.secret.iv.as_slice().try_into().map_err(|_| CipherError::InvalidConfiguration {
                message: format!("Invalid IV length {}, must be {BLOCK_SIZE} bytes", self.secret.iv.len())
                    .into(),
                context: Some("IV".into()),
            })?;

        let inner = CipherInner {
            key: Zeroizing::new(std::mem::take(&mut self.secret.key)),
            iv: Zeroizing::new(iv),
            key_size,
            policy: self.policy,
            diagnostics: self.diagnostics,
        };

        self.zeroize();

        Ok(EnvelopeCipher { inner: Arc::new(inner) })
    }
}
