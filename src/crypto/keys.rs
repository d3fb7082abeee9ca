//! Random key material: master secret keys, salts and nonces.
//!
//! A `SecretKey` is the long-lived 32-byte master key stored (base64
//! encoded) in the base environment file.  It is never used to encrypt
//! directly: every encryption derives a fresh key from it with Argon2id
//! and a per-call salt (see `kdf`).

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::TryRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{EnvSealError, Result};

/// Length of a master secret key in bytes (256 bits).
pub const SECRET_KEY_LEN: usize = 32;

/// Length of the per-encryption salt in bytes.
pub const SALT_LEN: usize = 32;

/// Length of the AES-GCM nonce in bytes (128 bits).
pub const NONCE_LEN: usize = 16;

/// A 32-byte master key that zeroes its memory when dropped.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey {
    bytes: [u8; SECRET_KEY_LEN],
}

impl SecretKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Decode a key from its base64 text form.
    ///
    /// The decoded value must be exactly 32 bytes.  Error messages never
    /// echo any part of the input.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(BASE64.decode(encoded.trim()).map_err(|_| {
            EnvSealError::Validation("secret key is not valid base64".into())
        })?);

        if decoded.len() != SECRET_KEY_LEN {
            return Err(EnvSealError::Validation(format!(
                "secret key must be exactly {SECRET_KEY_LEN} bytes, got {}",
                decoded.len()
            )));
        }

        let mut key = Self {
            bytes: [0u8; SECRET_KEY_LEN],
        };
        key.bytes.copy_from_slice(&decoded);
        Ok(key)
    }

    /// Base64 text of the raw key bytes.
    ///
    /// This is both the persisted form and the password fed to Argon2id.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(BASE64.encode(self.bytes))
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.bytes
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Generate a new random master key from the OS RNG.
pub fn generate_secret_key() -> Result<SecretKey> {
    let mut key = SecretKey {
        bytes: [0u8; SECRET_KEY_LEN],
    };
    fill_random(&mut key.bytes)?;
    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    fill_random(&mut salt)?;
    Ok(salt)
}

/// Generate a cryptographically random 16-byte nonce.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    fill_random(&mut nonce)?;
    Ok(nonce)
}

fn fill_random(buf: &mut [u8]) -> Result<()> {
    rand::rngs::OsRng
        .try_fill_bytes(buf)
        .map_err(|e| EnvSealError::Encryption(format!("OS random generator failed: {e}")))
}
