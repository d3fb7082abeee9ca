//! In-memory cache of loaded environment files, keyed by alias.
//!
//! Built once at start-up and only read afterwards.  Values may be
//! plaintext credentials or base64 keys, so each one is held in a
//! `Zeroizing<String>` and wiped when the cache is dropped.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::env::parser::parse_env_line;
use crate::errors::{EnvSealError, Result};

use super::Settings;

type Variables = HashMap<String, Zeroizing<String>>;

/// Parsed environment files, one variable map per alias.
#[derive(Default)]
pub struct EnvironmentConfig {
    environments: HashMap<String, Variables>,
}

impl EnvironmentConfig {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the base environment plus every alias in `aliases`, skipping
    /// files that do not exist.
    pub fn from_settings(project_dir: &Path, settings: &Settings, aliases: &[&str]) -> Result<Self> {
        let mut config = Self::new();

        config.load_if_exists(
            &settings.base_alias,
            &settings.base_environment_path(project_dir),
        )?;
        for alias in aliases {
            if *alias == settings.base_alias {
                continue;
            }
            config.load_if_exists(alias, &settings.environment_path(project_dir, alias))?;
        }

        Ok(config)
    }

    /// Parse the file at `path` and store its variables under `alias`.
    ///
    /// Replaces anything previously loaded for the same alias.  When a
    /// name appears more than once the last assignment wins.
    pub fn load(&mut self, alias: &str, path: &Path) -> Result<()> {
        let content =
            Zeroizing::new(fs::read_to_string(path).map_err(|e| EnvSealError::file_io(path, e))?);

        let variables: Variables = content
            .lines()
            .filter_map(parse_env_line)
            .map(|(name, value)| (name.to_string(), Zeroizing::new(value.to_string())))
            .collect();

        debug!(
            "loaded {} variables for alias '{alias}' from {}",
            variables.len(),
            path.display()
        );
        self.environments.insert(alias.to_string(), variables);
        Ok(())
    }

    /// Like `load`, but a missing file is skipped and reported as `false`.
    pub fn load_if_exists(&mut self, alias: &str, path: &Path) -> Result<bool> {
        if !path.exists() {
            debug!("no environment file for alias '{alias}' at {}", path.display());
            return Ok(false);
        }
        self.load(alias, path)?;
        Ok(true)
    }

    /// Set a single variable without touching the filesystem.
    pub fn insert_variable(&mut self, alias: &str, name: &str, value: &str) {
        self.environments
            .entry(alias.to_string())
            .or_default()
            .insert(name.to_string(), Zeroizing::new(value.to_string()));
    }

    /// Look up a variable for an alias.
    pub fn variable(&self, alias: &str, name: &str) -> Option<&str> {
        self.environments
            .get(alias)
            .and_then(|vars| vars.get(name))
            .map(|value| value.as_str())
    }

    /// Returns `true` if anything has been loaded for `alias`.
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.environments.contains_key(alias)
    }

    /// Loaded aliases, in no particular order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }
}
