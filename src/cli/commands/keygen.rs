//! `envseal keygen` — generate a master key and store it in the base file.

use std::path::Path;

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{load_settings, resolve_key_type, validate_alias, Cli};
use crate::config::{EnvironmentConfig, Settings};
use crate::crypto::generate_secret_key;
use crate::env::EnvironmentSecretStore;
use crate::errors::{EnvSealError, Result};

/// Execute the `keygen` command.
pub fn execute(cli: &Cli, alias: &str, key_type: Option<&str>, force: bool) -> Result<()> {
    validate_alias(alias)?;
    let settings = load_settings(cli)?;
    let key_type = resolve_key_type(&settings, alias, key_type);
    let base_path = settings.base_environment_path(&cli.project_dir);

    // Replacing a key orphans every value encrypted under the old one.
    if !force && key_already_stored(&settings, &base_path, &key_type)? {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "'{key_type}' already holds a key and values encrypted with it will become unreadable. Replace it?"
            ))
            .default(false)
            .interact()
            .map_err(|e| {
                EnvSealError::CommandFailed(format!("failed to read confirmation: {e}"))
            })?;

        if !confirmed {
            return Err(EnvSealError::UserCancelled);
        }
    }

    let key = generate_secret_key()?;
    EnvironmentSecretStore::save_secret_key_in_base_environment(
        &base_path,
        &key_type,
        &key.to_base64(),
    )?;

    output::success(&format!(
        "Secret key '{key_type}' saved in {}",
        base_path.display()
    ));
    output::tip(&format!(
        "Run `envseal encrypt {alias} <NAME>...` to encrypt credentials."
    ));

    Ok(())
}

fn key_already_stored(settings: &Settings, base_path: &Path, key_type: &str) -> Result<bool> {
    let mut config = EnvironmentConfig::new();
    if !config.load_if_exists(&settings.base_alias, base_path)? {
        return Ok(false);
    }
    Ok(config.variable(&settings.base_alias, key_type).is_some())
}
