//! utilkit-crypto - Password hashing and string encryption
//!
//! - [`hash`]: salted PBKDF2 hashes with their parameters, and validation.
//! - [`cipher`]: AES-256-GCM encryption keyed by a secret string, producing a
//!   single base64 token.

pub mod cipher;
pub mod error;
pub mod hash;

pub use cipher::{decrypt_data, encrypt_data};
pub use error::{CryptoError, Result};
pub use hash::{hash_string, validate_hash, Digest, HashOptions, HashedString};
