//! Encrypt-in-place and decrypt-on-demand for environment variables.
//!
//! `EnvironmentSecretStore` ties the loaded configuration, the key
//! registry, the cipher and the file patcher together so a test runner
//! can write `store.decrypt_variable("UAT", "UAT_SECRET_KEY", "PORTAL_PASSWORD")`.
//!
//! Master keys always come from the base alias: the `alias` argument
//! only selects where the variable's value is read from.

use std::path::Path;

use tracing::{error, info};

use crate::config::EnvironmentConfig;
use crate::crypto::cipher::{decrypt, decrypt_async, encrypt};
use crate::crypto::SecretKey;
use crate::errors::{EnvSealError, Result};
use crate::registry::SecretKeyRegistry;

use super::file::{ensure_file_exists, update_environment_variable, validate_variable_name};

/// Alias used for master-key lookups unless overridden.
pub const DEFAULT_BASE_ALIAS: &str = "BASE";

/// Read-only view over a loaded configuration and its master keys.
pub struct EnvironmentSecretStore<'a> {
    config: &'a EnvironmentConfig,
    registry: &'a SecretKeyRegistry,
    base_alias: String,
}

impl<'a> EnvironmentSecretStore<'a> {
    /// Create a store that resolves keys under `DEFAULT_BASE_ALIAS`.
    pub fn new(config: &'a EnvironmentConfig, registry: &'a SecretKeyRegistry) -> Self {
        Self {
            config,
            registry,
            base_alias: DEFAULT_BASE_ALIAS.to_string(),
        }
    }

    /// Resolve master keys under a different alias.
    pub fn with_base_alias(mut self, base_alias: impl Into<String>) -> Self {
        self.base_alias = base_alias.into();
        self
    }

    // ------------------------------------------------------------------
    // Encrypt path
    // ------------------------------------------------------------------

    /// Encrypt the cached plaintext of `name` (read under `alias`) and
    /// patch the result into `file_path`.
    pub fn encrypt_variable(
        &self,
        file_path: &Path,
        alias: &str,
        key_type: &str,
        name: &str,
    ) -> Result<()> {
        self.encrypt_one(file_path, alias, key_type, name)
            .inspect_err(|e| error!("encrypt_variable: failed to encrypt variable '{name}': {e}"))?;
        info!("variable '{name}' encrypted successfully");
        Ok(())
    }

    /// Encrypt several variables in order, stopping at the first failure.
    ///
    /// Variables before the failing one stay encrypted on disk; the ones
    /// after it are not touched.
    pub fn encrypt_variables<S: AsRef<str>>(
        &self,
        file_path: &Path,
        alias: &str,
        key_type: &str,
        names: &[S],
    ) -> Result<()> {
        for name in names {
            self.encrypt_variable(file_path, alias, key_type, name.as_ref())
                .inspect_err(|_| error!("encrypt_variables: aborted, failed to encrypt multiple variables"))?;
        }
        Ok(())
    }

    fn encrypt_one(&self, file_path: &Path, alias: &str, key_type: &str, name: &str) -> Result<()> {
        validate_variable_name(name)?;
        let plaintext = self.cached_value(alias, name)?;
        let key = self.secret_key(key_type)?;
        let encrypted = encrypt(key, plaintext)?;
        update_environment_variable(file_path, name, &encrypted)
    }

    // ------------------------------------------------------------------
    // Decrypt path
    // ------------------------------------------------------------------

    /// Decrypt the cached value of `name` under `alias`.
    ///
    /// Cipher failures come back wrapped in `VariableDecryption`.
    pub fn decrypt_variable(&self, alias: &str, key_type: &str, name: &str) -> Result<String> {
        self.secret_key(key_type)
            .and_then(|key| self.decrypt_with(key, alias, name))
            .inspect_err(|e| error!("decrypt_variable: failed to decrypt key '{name}': {e}"))
    }

    /// Decrypt several variables, preserving input order and duplicates.
    ///
    /// An empty list returns immediately without touching the registry
    /// or the cipher.
    pub fn decrypt_variables<S: AsRef<str>>(
        &self,
        alias: &str,
        key_type: &str,
        names: &[S],
    ) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let key = self
            .secret_key(key_type)
            .inspect_err(|e| error!("decrypt_variables: {e}"))?;
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.decrypt_with(key, alias, name).inspect_err(|e| {
                    error!("decrypt_variables: failed to decrypt key '{name}': {e}")
                })
            })
            .collect()
    }

    /// `decrypt_variable` with the cipher work moved off the calling task.
    pub async fn decrypt_variable_async(
        &self,
        alias: &str,
        key_type: &str,
        name: &str,
    ) -> Result<String> {
        let result = match (self.secret_key(key_type), self.cached_value(alias, name)) {
            (Ok(key), Ok(encrypted)) => decrypt_async(key, encrypted)
                .await
                .map_err(|e| wrap_decrypt_error(name, e)),
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        result.inspect_err(|e| error!("decrypt_variable_async: failed to decrypt key '{name}': {e}"))
    }

    fn decrypt_with(&self, key: &SecretKey, alias: &str, name: &str) -> Result<String> {
        let encrypted = self.cached_value(alias, name)?;
        decrypt(key, encrypted).map_err(|e| wrap_decrypt_error(name, e))
    }

    // ------------------------------------------------------------------
    // Key storage
    // ------------------------------------------------------------------

    /// Write `key_name=encoded_key` into the base environment file,
    /// creating the file and its directory first if needed.
    pub fn save_secret_key_in_base_environment(
        file_path: &Path,
        key_name: &str,
        encoded_key: &str,
    ) -> Result<()> {
        ensure_file_exists(file_path)
            .and_then(|()| update_environment_variable(file_path, key_name, encoded_key))
            .inspect_err(|e| {
                error!("save_secret_key_in_base_environment: failed to save secret key '{key_name}': {e}")
            })?;
        info!("secret key saved for variable '{key_name}'");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    fn cached_value(&self, alias: &str, name: &str) -> Result<&'a str> {
        self.config
            .variable(alias, name)
            .ok_or_else(|| EnvSealError::MissingVariable {
                alias: alias.to_string(),
                name: name.to_string(),
            })
    }

    fn secret_key(&self, key_type: &str) -> Result<&'a SecretKey> {
        self.registry.get_secret_key(&self.base_alias, key_type)
    }
}

fn wrap_decrypt_error(name: &str, source: EnvSealError) -> EnvSealError {
    EnvSealError::VariableDecryption {
        name: name.to_string(),
        source: Box::new(source),
    }
}
