//! Vault key derivation.
//!
//! Turns the machine identity into a 256-bit token key. The current scheme
//! stretches the identity with PBKDF2-HMAC-SHA256 over a per-vault random
//! salt; the legacy scheme was a single unsalted SHA-256 digest and is kept
//! only so existing vaults can be decrypted once and re-encrypted.

use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::core::constants::{PBKDF2_ITERATIONS, SALT_LEN};
use crate::core::machine;

/// Derive the current vault key from machine identity and salt.
///
/// PBKDF2-HMAC-SHA256, 600,000 iterations, 256-bit output. Intentionally
/// slow; callers must not cache the result beyond a single encrypt or
/// decrypt call.
pub fn derive_key(salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; 32]> {
    let identity = machine::identity();
    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2_hmac::<Sha256>(identity.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    key
}

/// Derive the predecessor key: a bare SHA-256 of the machine identity.
///
/// No salt, no stretching. Only used on the legacy decode branch during
/// migration.
pub fn legacy_key() -> Zeroizing<[u8; 32]> {
    let identity = machine::identity();
    let digest = Sha256::digest(identity.as_bytes());
    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&digest);
    key
}
