//! Cryptographic primitives for envseal.
//!
//! This module provides:
//! - Random master keys, salts and nonces (`keys`)
//! - Argon2id key derivation with fixed parameters (`kdf`)
//! - The salt/nonce/ciphertext wire layout (`blob`)
//! - AES-256-GCM encryption and decryption of strings (`cipher`)

pub mod blob;
pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, SecretKey, ...};
pub use blob::EncryptedBlob;
pub use cipher::{decrypt, decrypt_async, encrypt};
pub use kdf::{derive_key, DerivedKey};
pub use keys::{generate_nonce, generate_salt, generate_secret_key, SecretKey};
