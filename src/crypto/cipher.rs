//! AES-256-GCM authenticated encryption of string values.
//!
//! Each call to `encrypt` generates a fresh salt and a fresh 16-byte
//! nonce, derives a one-off AES key from the master key and the salt,
//! and packs everything into a single base64 blob (see `blob`).
//! `decrypt` reverses that using the salt and nonce stored in the blob.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::Aead;
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, KeyInit, Nonce};
use tracing::debug;
use zeroize::Zeroize;

use crate::errors::{EnvSealError, Result};

use super::blob::EncryptedBlob;
use super::kdf::derive_key;
use super::keys::{generate_nonce, generate_salt, SecretKey};

/// AES-256-GCM with a 128-bit nonce and the default 128-bit tag.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypt `plaintext` under `key`.
///
/// Returns `base64(salt || nonce || ciphertext+tag)`.
pub fn encrypt(key: &SecretKey, plaintext: &str) -> Result<String> {
    let salt = generate_salt()?;
    let derived = derive_key(key.to_base64(), &salt)?;
    let nonce = generate_nonce()?;

    let cipher = Aes256Gcm16::new_from_slice(&derived[..])
        .map_err(|e| EnvSealError::Encryption(format!("invalid key length: {e}")))?;

    let ciphertext = cipher
        .encrypt(Nonce::<U16>::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| EnvSealError::Encryption(format!("encryption error: {e}")))?;

    let blob = EncryptedBlob {
        salt,
        nonce,
        ciphertext,
    };
    Ok(blob.to_base64())
}

/// Decrypt a base64 blob produced by `encrypt`.
///
/// A blob that is not base64 or is shorter than salt + nonce fails with
/// `MalformedBlob` before any key derivation.  A tag that does not
/// verify fails with `AuthenticationFailed`.
pub fn decrypt(key: &SecretKey, encoded_blob: &str) -> Result<String> {
    if encoded_blob.trim().is_empty() {
        return Err(EnvSealError::Validation(
            "encrypted value cannot be empty".into(),
        ));
    }

    let blob = EncryptedBlob::from_base64(encoded_blob)?;
    let derived = derive_key(key.to_base64(), &blob.salt)?;

    let cipher = Aes256Gcm16::new_from_slice(&derived[..])
        .map_err(|e| EnvSealError::Decryption(format!("invalid key length: {e}")))?;

    let plaintext_bytes = cipher
        .decrypt(Nonce::<U16>::from_slice(&blob.nonce), blob.ciphertext.as_slice())
        .map_err(|_| {
            debug!("tag mismatch: incorrect key, nonce, or ciphertext corruption");
            EnvSealError::AuthenticationFailed
        })?;

    String::from_utf8(plaintext_bytes).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        EnvSealError::Decryption("plaintext is not valid UTF-8".into())
    })
}

/// Run `decrypt` on tokio's blocking pool.
///
/// Same inputs, outputs and errors as `decrypt`; it only keeps the
/// calling task free while Argon2 runs.  Must be awaited inside a tokio
/// runtime.  Once started the work cannot be cancelled.
pub async fn decrypt_async(key: &SecretKey, encoded_blob: &str) -> Result<String> {
    let key = key.clone();
    let encoded_blob = encoded_blob.to_owned();

    tokio::task::spawn_blocking(move || decrypt(&key, &encoded_blob))
        .await
        .map_err(|e| EnvSealError::Decryption(format!("background decrypt task failed: {e}")))?
}
