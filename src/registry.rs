//! Master key lookup per (environment alias, key type).
//!
//! Keys are decoded once from an already-loaded `EnvironmentConfig` and
//! then only read.  The registry never generates key material.

use std::collections::HashMap;

use tracing::debug;

use crate::config::EnvironmentConfig;
use crate::crypto::SecretKey;
use crate::errors::{EnvSealError, Result};

/// Decoded master keys, indexed by alias then key type.
#[derive(Default)]
pub struct SecretKeyRegistry {
    keys: HashMap<String, HashMap<String, SecretKey>>,
}

impl SecretKeyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every listed key type found in any loaded alias.
    ///
    /// Key types absent from an alias are skipped; asking for them later
    /// is a lookup error.  A value that is not a valid base64 32-byte key
    /// fails the whole load.
    pub fn from_config<I, S>(config: &EnvironmentConfig, key_types: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key_types: Vec<S> = key_types.into_iter().collect();
        let mut registry = Self::new();

        for alias in config.aliases() {
            for key_type in &key_types {
                let key_type = key_type.as_ref();
                let Some(encoded) = config.variable(alias, key_type) else {
                    continue;
                };
                let key = SecretKey::from_base64(encoded).map_err(|e| {
                    EnvSealError::Validation(format!(
                        "secret key '{key_type}' for alias '{alias}' is unusable: {e}"
                    ))
                })?;
                debug!("registered secret key '{key_type}' for alias '{alias}'");
                registry.insert(alias, key_type, key);
            }
        }

        Ok(registry)
    }

    /// Register a key, replacing any previous one for the same pair.
    pub fn insert(&mut self, alias: &str, key_type: &str, key: SecretKey) {
        self.keys
            .entry(alias.to_string())
            .or_default()
            .insert(key_type.to_string(), key);
    }

    /// Look up the master key for `(alias, key_type)`.
    pub fn get_secret_key(&self, alias: &str, key_type: &str) -> Result<&SecretKey> {
        self.keys
            .get(alias)
            .and_then(|keys| keys.get(key_type))
            .ok_or_else(|| EnvSealError::SecretKeyNotFound {
                alias: alias.to_string(),
                key_type: key_type.to_string(),
            })
    }

    /// Number of registered keys across all aliases.
    pub fn len(&self) -> usize {
        self.keys.values().map(HashMap::len).sum()
    }

    /// Returns `true` if no key is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
