//! Error types for hashing and encryption.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The key derivation parameters were rejected.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Wrong secret or tampered ciphertext.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Input was not valid base64 or the plaintext was not UTF-8.
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unsupported digest: {0}")]
    UnsupportedDigest(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
