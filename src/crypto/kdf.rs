//! Key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  The parameters are fixed: changing any of them
//! makes every previously encrypted value undecryptable.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use crate::errors::{EnvSealError, Result};

use super::keys::SALT_LEN;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Memory cost in KiB (64 MiB).
pub const ARGON2_MEMORY_KIB: u32 = 65_536;

/// Number of passes over memory.
pub const ARGON2_ITERATIONS: u32 = 3;

/// Parallelism lanes.
pub const ARGON2_PARALLELISM: u32 = 4;

/// A 32-byte AES key, zeroed on drop.
pub type DerivedKey = Zeroizing<[u8; KEY_LEN]>;

/// Derive a 32-byte key from a secret string and salt using Argon2id.
///
/// The secret is taken by value and wiped when this function returns,
/// on success and on error alike.  The same secret + salt always
/// produce the same key.
pub fn derive_key(secret: Zeroizing<String>, salt: &[u8; SALT_LEN]) -> Result<DerivedKey> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(KEY_LEN),
    )
    .map_err(|e| EnvSealError::KeyDerivation(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(secret.as_bytes(), salt, &mut *key)
        .map_err(|e| EnvSealError::KeyDerivation(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}
