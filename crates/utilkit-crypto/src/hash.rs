//! Salted PBKDF2 password hashing.
//!
//! [`hash_string`] draws a fresh salt for every call and returns everything
//! needed to check a password later with [`validate_hash`]. The salt is the
//! base64 text of 128 random bytes, and that text (not the raw bytes) is what
//! feeds PBKDF2, so stored salts can be passed back verbatim.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;

use crate::error::{CryptoError, Result};

/// Number of random bytes behind each salt.
pub const SALT_LENGTH: usize = 128;

/// HMAC hash function used inside PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Digest {
    Sha256,
    #[default]
    Sha512,
}

impl Digest {
    pub fn as_str(&self) -> &'static str {
        match self {
            Digest::Sha256 => "sha256",
            Digest::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Digest {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(Digest::Sha256),
            "sha512" => Ok(Digest::Sha512),
            _ => Err(CryptoError::UnsupportedDigest(s.to_string())),
        }
    }
}

/// Parameters for [`hash_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOptions {
    pub iterations: u32,
    /// Derived key length in bytes; the hex hash is twice as long.
    pub key_len: usize,
    pub digest: Digest,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            key_len: 64,
            digest: Digest::Sha512,
        }
    }
}

/// A hash together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedString {
    pub salt: String,
    pub hash: String,
    pub iterations: u32,
    pub key_len: usize,
}

/// Hash `input` with a fresh random salt.
///
/// # Errors
///
/// Returns [`CryptoError::KeyDerivation`] when `iterations` or `key_len` is
/// zero.
///
/// # Examples
///
/// ```
/// use utilkit_crypto::hash::{hash_string, validate_hash, Digest, HashOptions};
///
/// let options = HashOptions { iterations: 1_000, key_len: 32, digest: Digest::Sha256 };
/// let hashed = hash_string("hunter2", options).unwrap();
/// assert_eq!(hashed.hash.len(), 64);
/// assert!(validate_hash("hunter2", &hashed.hash, &hashed.salt, 1_000, 32, Digest::Sha256));
/// assert!(!validate_hash("hunter3", &hashed.hash, &hashed.salt, 1_000, 32, Digest::Sha256));
/// ```
pub fn hash_string(input: &str, options: HashOptions) -> Result<HashedString> {
    let mut salt_bytes = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = STANDARD.encode(salt_bytes);
    let hash = derive_hex(input, &salt, options.iterations, options.key_len, options.digest)?;
    Ok(HashedString {
        salt,
        hash,
        iterations: options.iterations,
        key_len: options.key_len,
    })
}

/// Check `password` against a stored hash and salt.
///
/// The comparison runs in constant time over the decoded bytes. A hash that is
/// not hex, and parameters that cannot derive a key, count as a mismatch.
pub fn validate_hash(
    password: &str,
    hash: &str,
    salt: &str,
    iterations: u32,
    key_len: usize,
    digest: Digest,
) -> bool {
    let Ok(stored) = hex::decode(hash) else {
        return false;
    };
    match derive_bytes(password, salt, iterations, key_len, digest) {
        Ok(derived) => derived.as_slice().ct_eq(stored.as_slice()).into(),
        Err(err) => {
            tracing::debug!(%err, "hash validation skipped");
            false
        }
    }
}

/// Run PBKDF2 over `input` and `salt` and hex-encode the derived key.
pub fn derive_hex(input: &str, salt: &str, iterations: u32, key_len: usize, digest: Digest) -> Result<String> {
    derive_bytes(input, salt, iterations, key_len, digest).map(hex::encode)
}

fn derive_bytes(input: &str, salt: &str, iterations: u32, key_len: usize, digest: Digest) -> Result<Vec<u8>> {
    if iterations == 0 {
        return Err(CryptoError::KeyDerivation("iterations must be greater than zero".to_string()));
    }
    if key_len == 0 {
        return Err(CryptoError::KeyDerivation("key length must be greater than zero".to_string()));
    }
    let mut out = vec![0u8; key_len];
    match digest {
        Digest::Sha256 => pbkdf2::pbkdf2_hmac::<Sha256>(input.as_bytes(), salt.as_bytes(), iterations, &mut out),
        Digest::Sha512 => pbkdf2::pbkdf2_hmac::<Sha512>(input.as_bytes(), salt.as_bytes(), iterations, &mut out),
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            derive_hex("password", "salt", 1, 32, Digest::Sha256).unwrap(),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
        assert_eq!(
            derive_hex("password", "salt", 1, 64, Digest::Sha512).unwrap(),
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252\
             c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce"
        );
    }

    #[test]
    fn test_hash_string_shape() {
        let options = HashOptions {
            iterations: 10,
            ..HashOptions::default()
        };
        let hashed = hash_string("secret", options).unwrap();
        assert_eq!(hashed.iterations, 10);
        assert_eq!(hashed.key_len, 64);
        assert_eq!(hashed.hash.len(), 128);
        assert_eq!(STANDARD.decode(&hashed.salt).unwrap().len(), SALT_LENGTH);
    }

    #[test]
    fn test_salts_differ() {
        let options = HashOptions {
            iterations: 1,
            key_len: 16,
            digest: Digest::Sha256,
        };
        let a = hash_string("same", options).unwrap();
        let b = hash_string("same", options).unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_validate_rejects_wrong_parameters() {
        let hashed = hash_string("pw", HashOptions { iterations: 5, key_len: 32, digest: Digest::Sha512 }).unwrap();
        assert!(validate_hash("pw", &hashed.hash, &hashed.salt, 5, 32, Digest::Sha512));
        assert!(!validate_hash("pw", &hashed.hash, &hashed.salt, 6, 32, Digest::Sha512));
        assert!(!validate_hash("pw", &hashed.hash, &hashed.salt, 5, 32, Digest::Sha256));
        assert!(!validate_hash("pw", &hashed.hash, &hashed.salt, 0, 32, Digest::Sha512));
    }

    #[test]
    fn test_validate_rejects_malformed_hash() {
        let salt = "c2FsdA==";
        let hash = derive_hex("pw", salt, 3, 16, Digest::Sha256).unwrap();
        assert!(validate_hash("pw", &hash.to_uppercase(), salt, 3, 16, Digest::Sha256));
        assert!(!validate_hash("pw", &hash[..30], salt, 3, 16, Digest::Sha256));
        assert!(!validate_hash("pw", "not hex", salt, 3, 16, Digest::Sha256));
        assert!(!validate_hash("pw", "", salt, 3, 16, Digest::Sha256));
    }

    #[test]
    fn test_zero_parameters_error() {
        assert!(matches!(
            hash_string("pw", HashOptions { iterations: 0, ..HashOptions::default() }),
            Err(CryptoError::KeyDerivation(_))
        ));
        assert!(matches!(
            derive_hex("pw", "salt", 1, 0, Digest::Sha256),
            Err(CryptoError::KeyDerivation(_))
        ));
    }

    #[test]
    fn test_digest_parsing() {
        assert_eq!("sha256".parse::<Digest>().unwrap(), Digest::Sha256);
        assert_eq!("SHA-512".parse::<Digest>().unwrap(), Digest::Sha512);
        assert_eq!(Digest::default().to_string(), "sha512");
        assert_eq!(
            "md5".parse::<Digest>(),
            Err(CryptoError::UnsupportedDigest("md5".to_string()))
        );
    }
}
