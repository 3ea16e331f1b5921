//! Envelope cryptography for the e-invoice protocol.
//!
//! The remote service expects every business payload to be sealed the same way:
//!
//! ```text
//! plaintext -> query escape -> pad to 16 -> AES-CBC(key, iv) -> base64
//! ```
//!
//! and answers with a payload sealed identically. The key (16, 24 or 32 bytes)
//! and the 16 byte IV are issued per merchant and never change, so sealing is
//! deterministic. This is dictated by the protocol; do not swap in an AEAD mode.
//!
//! ## Padding
//!
//! Padding appends `n` bytes of value `n` (`1..=16`). When opening, the
//! [`UnpadPolicy::Lenient`] default follows the remote service: a trailing count
//! larger than the buffer leaves the buffer as is instead of failing.
//! [`UnpadPolicy::Strict`] rejects such payloads with [`CipherError::Padding`].
//!
//! ## Example
//! ```rust
//! use ecinv_cipher::prelude::*;
//!
//! # fn main() -> Result<(), CipherError> {
//! let cipher = EnvelopeCipher::builder()
//!     .secret("ejCk326UnaZWKisg", "q9jcZX8Ib9LM8wYk")
//!     .unpad_policy(UnpadPolicy::Strict)
//!     .build()?;
//!
//! let sealed = cipher.seal("A")?;
//! assert_eq!(cipher.open(&sealed)?, b"A");
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
pub mod escape;
pub mod padding;
mod types;

pub use builder::{CipherBuilder, NoSecret, WithSecret};
pub use engine::EnvelopeCipher;
pub use error::{CipherError, CipherErrorExt};
pub use types::{BLOCK_SIZE, DIAGNOSTICS_TARGET, KeySize, UnpadPolicy};

pub mod prelude {
    pub use crate::engine::EnvelopeCipher;
    pub use crate::error::{CipherError, CipherErrorExt};
    pub use crate::types::{BLOCK_SIZE, KeySize, UnpadPolicy};
}
