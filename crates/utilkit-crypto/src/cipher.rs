//! Password-based string encryption using AES-256-GCM.
//!
//! The 256-bit key is derived from the secret with PBKDF2-HMAC-SHA256 over a
//! fixed application salt. Every encryption draws a fresh 96-bit nonce and the
//! output is `base64(nonce || ciphertext || tag)`, so a single string carries
//! everything [`decrypt_data`] needs besides the secret.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{CryptoError, Result};

/// Length of the nonce in bytes.
pub const NONCE_LENGTH: usize = 12;

/// Length of the GCM authentication tag in bytes.
pub const TAG_LENGTH: usize = 16;

pub const KEY_LENGTH: usize = 32;

pub const KEY_ITERATIONS: u32 = 100_000;

/// Salt shared by every derived key.
pub const APP_SALT: &[u8] = b"reposter-salt";

fn derive_key(secret: &str) -> Zeroizing<[u8; KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2::pbkdf2_hmac::<Sha256>(secret.as_bytes(), APP_SALT, KEY_ITERATIONS, key.as_mut());
    key
}

fn cipher_for(secret: &str) -> Result<Aes256Gcm> {
    let key = derive_key(secret);
    Aes256Gcm::new_from_slice(key.as_ref()).map_err(|e| CryptoError::KeyDerivation(format!("invalid key: {e}")))
}

/// Encrypt `plain_text` under `secret`.
///
/// # Errors
///
/// Returns [`CryptoError::Encryption`] if the cipher rejects the input.
///
/// # Examples
///
/// ```
/// use utilkit_crypto::cipher::{decrypt_data, encrypt_data};
///
/// let sealed = encrypt_data("launch codes", "correct horse battery staple").unwrap();
/// assert_ne!(sealed, "launch codes");
/// assert_eq!(decrypt_data(&sealed, "correct horse battery staple").unwrap(), "launch codes");
/// assert!(decrypt_data(&sealed, "wrong secret").is_err());
/// ```
pub fn encrypt_data(plain_text: &str, secret: &str) -> Result<String> {
    let cipher = cipher_for(secret)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plain_text.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("encryption failed: {e}")))?;

    let mut combined = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    combined.extend_from_slice(nonce.as_slice());
    combined.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(combined))
}

/// Decrypt a string produced by [`encrypt_data`] with the same `secret`.
///
/// # Errors
///
/// - [`CryptoError::Encoding`] if the input is not base64 or the plaintext is
///   not UTF-8
/// - [`CryptoError::InvalidData`] if the input is too short to hold a nonce
///   and tag
/// - [`CryptoError::Decryption`] if the secret is wrong or the data was
///   tampered with
pub fn decrypt_data(encrypted: &str, secret: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encrypted.trim())
        .map_err(|e| CryptoError::Encoding(format!("invalid base64: {e}")))?;
    if bytes.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(CryptoError::InvalidData(format!(
            "expected at least {} bytes, got {}",
            NONCE_LENGTH + TAG_LENGTH,
            bytes.len()
        )));
    }
    let (nonce, ciphertext) = bytes.split_at(NONCE_LENGTH);

    let cipher = cipher_for(secret)?;
    let plaintext = cipher.decrypt(Nonce::from_slice(nonce), ciphertext).map_err(|e| {
        tracing::debug!(len = bytes.len(), "authenticated decryption rejected input");
        CryptoError::Decryption(format!("decryption failed: {e}"))
    })?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::Encoding(format!("plaintext is not UTF-8: {e}")))
}
