use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{EnvSealError, Result};

/// Project-level configuration, loaded from `.envseal.toml`.
///
/// Every field has a sensible default so envseal works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) holding the environment files.
    #[serde(default = "default_env_dir")]
    pub env_dir: String,

    /// Alias of the environment file that stores the master keys.
    #[serde(default = "default_base_alias")]
    pub base_alias: String,

    /// Alias -> file name overrides inside `env_dir`.
    #[serde(default = "default_files")]
    pub files: BTreeMap<String, String>,

    /// Alias -> name of the base-file variable holding that alias's key.
    #[serde(default)]
    pub secret_keys: BTreeMap<String, String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_env_dir() -> String {
    "environments".to_string()
}

fn default_base_alias() -> String {
    "BASE".to_string()
}

fn default_files() -> BTreeMap<String, String> {
    BTreeMap::from([(default_base_alias(), ".env".to_string())])
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_dir: default_env_dir(),
            base_alias: default_base_alias(),
            files: default_files(),
            secret_keys: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".envseal.toml";

    /// Load settings from `<project_dir>/.envseal.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| EnvSealError::file_io(&config_path, e))?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            EnvSealError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the environment file for `alias`.
    ///
    /// Aliases without an entry in `files` map to `.env.<alias>` in
    /// lower case, e.g. `UAT` -> `project_dir/environments/.env.uat`.
    pub fn environment_path(&self, project_dir: &Path, alias: &str) -> PathBuf {
        let file_name = self
            .files
            .get(alias)
            .cloned()
            .unwrap_or_else(|| format!(".env.{}", alias.to_lowercase()));
        project_dir.join(&self.env_dir).join(file_name)
    }

    /// Path to the base environment file.
    pub fn base_environment_path(&self, project_dir: &Path) -> PathBuf {
        self.environment_path(project_dir, &self.base_alias)
    }

    /// Name of the variable holding the master key for `alias`.
    ///
    /// Defaults to `<ALIAS>_SECRET_KEY`.
    pub fn key_type_for(&self, alias: &str) -> String {
        self.secret_keys
            .get(alias)
            .cloned()
            .unwrap_or_else(|| format!("{}_SECRET_KEY", alias.to_uppercase()))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
