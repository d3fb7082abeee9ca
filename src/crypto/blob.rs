//! On-disk layout of an encrypted value.
//!
//! ```text
//! base64( [salt: 32 bytes][nonce: 16 bytes][ciphertext + 16-byte GCM tag] )
//! ```
//!
//! There is no magic or version byte.  Encrypt and decrypt both assume
//! this exact layout.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{EnvSealError, Result};

use super::keys::{NONCE_LEN, SALT_LEN};

/// Size of the fixed prefix (salt + nonce).
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// Size of the AES-GCM authentication tag appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// An encrypted value split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the GCM tag appended.
    pub ciphertext: Vec<u8>,
}

impl EncryptedBlob {
    /// Concatenate salt, nonce and ciphertext.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Split raw bytes into salt, nonce and ciphertext.
    ///
    /// Anything shorter than `HEADER_LEN` is rejected.  The ciphertext
    /// may be empty here; the AEAD layer rejects a missing tag.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(EnvSealError::MalformedBlob(format!(
                "expected at least {HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let (salt_bytes, rest) = bytes.split_at(SALT_LEN);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(salt_bytes);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);

        Ok(Self {
            salt,
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode the blob as standard padded base64.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Decode a base64 blob.  Surrounding whitespace is ignored.
    ///
    /// The input may be a credential that was never encrypted, so the
    /// error does not describe where decoding failed.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|_| EnvSealError::MalformedBlob("value is not valid base64".into()))?;
        Self::from_bytes(&bytes)
    }
}
