//! Authenticated vault tokens.
//!
//! Implements the Fernet token format: a versioned, base64url-encoded
//! record of `0x80 || timestamp || iv || AES-128-CBC ciphertext` followed
//! by an HMAC-SHA-256 tag over everything before it. The 256-bit vault key
//! splits in half: the first 16 bytes sign, the last 16 encrypt.
//!
//! Tokens that fail the version or integrity check are rejected before any
//! ciphertext is touched. Timestamps are recorded but not expired; vault
//! records have no TTL.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{CredentialError, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

/// Token format marker.
const VERSION: u8 = 0x80;

/// Version byte + big-endian timestamp + IV.
const HEADER_LEN: usize = 1 + 8 + 16;

/// HMAC-SHA-256 tag length.
const TAG_LEN: usize = 32;

/// Encrypt `plaintext` under a 256-bit vault key.
pub fn encrypt(key: &[u8; 32], plaintext: &[u8]) -> Result<String> {
    let (sign_key, enc_key) = key.split_at(16);

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut iv = [0u8; 16];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes128CbcEnc::new_from_slices(enc_key, &iv)
        .map_err(|e| CredentialError::DecryptionFailed(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut token = Vec::with_capacity(HEADER_LEN + ciphertext.len() + TAG_LEN);
    token.push(VERSION);
    token.extend_from_slice(&timestamp.to_be_bytes());
    token.extend_from_slice(&iv);
    token.extend_from_slice(&ciphertext);

    let mut mac = HmacSha256::new_from_slice(sign_key)
        .map_err(|e| CredentialError::DecryptionFailed(e.to_string()))?;
    mac.update(&token);
    token.extend_from_slice(&mac.finalize().into_bytes());

    Ok(URL_SAFE.encode(token))
}

/// Decrypt a token under a 256-bit vault key.
///
/// Fails with `CredentialError::DecryptionFailed` on any malformed,
/// tampered, or wrong-key token; partial plaintext is never returned.
pub fn decrypt(key: &[u8; 32], token: &str) -> Result<Zeroizing<Vec<u8>>> {
    let (sign_key, enc_key) = key.split_at(16);

    let raw = URL_SAFE
        .decode(token.trim())
        .map_err(|_| CredentialError::DecryptionFailed("token is not valid base64".to_string()))?;

    if raw.len() < HEADER_LEN + TAG_LEN {
        return Err(CredentialError::DecryptionFailed("token too short".to_string()).into());
    }
    if raw[0] != VERSION {
        return Err(CredentialError::DecryptionFailed(format!(
            "unsupported token version: {:#04x}",
            raw[0]
        ))
        .into());
    }

    let (signed, tag) = raw.split_at(raw.len() - TAG_LEN);

    let mut mac = HmacSha256::new_from_slice(sign_key)
        .map_err(|e| CredentialError::DecryptionFailed(e.to_string()))?;
    mac.update(signed);
    mac.verify_slice(tag)
        .map_err(|_| CredentialError::DecryptionFailed("token integrity check failed".to_string()))?;

    let iv = &signed[9..HEADER_LEN];
    let ciphertext = &signed[HEADER_LEN..];

    let plaintext = Aes128CbcDec::new_from_slices(enc_key, iv)
        .map_err(|e| CredentialError::DecryptionFailed(e.to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CredentialError::DecryptionFailed("invalid ciphertext padding".to_string()))?;

    Ok(Zeroizing::new(plaintext))
}
