use ecinv_cipher::prelude::*;

/// Merchant key and IV published for the staging environment.
pub const STAGE_KEY: &str = "ejCk326UnaZWKisg";
pub const STAGE_IV: &str = "q9jcZX8Ib9LM8wYk";

/// Builds a cipher with the staging secret material.
/// # Panics
/// * If the cipher cannot be built.
#[must_use]
pub fn setup_cipher(policy: UnpadPolicy) -> EnvelopeCipher {
    EnvelopeCipher::builder()
        .secret(STAGE_KEY, STAGE_IV)
        .unpad_policy(policy)
        .build()
        .expect("Cipher setup failed")
}
