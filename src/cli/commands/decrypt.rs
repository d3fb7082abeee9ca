//! `envseal decrypt` — print decrypted variables.
//!
//! Supported formats:
//! - `env` (default): `NAME=value`, one per line, in argument order
//! - `json`: JSON object { "NAME": "value", ... }

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::cli::output;
use crate::cli::{load_settings, resolve_key_type, validate_alias, Cli};
use crate::config::EnvironmentConfig;
use crate::env::EnvironmentSecretStore;
use crate::errors::{EnvSealError, Result};
use crate::registry::SecretKeyRegistry;

/// Execute the `decrypt` command.
pub fn execute(
    cli: &Cli,
    alias: &str,
    names: &[String],
    key_type: Option<&str>,
    format: &str,
) -> Result<()> {
    validate_alias(alias)?;
    if format != "env" && format != "json" {
        return Err(EnvSealError::CommandFailed(format!(
            "unknown output format '{format}' — use 'env' or 'json'"
        )));
    }

    let settings = load_settings(cli)?;
    let key_type = resolve_key_type(&settings, alias, key_type);

    let config = EnvironmentConfig::from_settings(&cli.project_dir, &settings, &[alias])?;
    if !config.contains_alias(alias) {
        return Err(EnvSealError::CommandFailed(format!(
            "no environment file for '{alias}' at {}",
            settings.environment_path(&cli.project_dir, alias).display()
        )));
    }

    let registry = SecretKeyRegistry::from_config(&config, [&key_type])?;
    let store =
        EnvironmentSecretStore::new(&config, &registry).with_base_alias(&settings.base_alias);

    let values = store.decrypt_variables(alias, &key_type, names)?;

    let content = if format == "json" {
        format_as_json(names, &values)?
    } else {
        format_as_env(names, &values)
    };

    output::warning("Decrypted values follow in plain text.");
    print!("{content}");

    Ok(())
}

/// Format name/value pairs as `NAME=value` lines.
fn format_as_env(names: &[String], values: &[String]) -> String {
    let mut out = String::new();
    for (name, value) in names.iter().zip(values) {
        let _ = writeln!(out, "{name}={value}");
    }
    out
}

/// Format name/value pairs as a JSON object.  Repeated names collapse.
fn format_as_json(names: &[String], values: &[String]) -> Result<String> {
    let map: BTreeMap<&str, &str> = names
        .iter()
        .map(String::as_str)
        .zip(values.iter().map(String::as_str))
        .collect();
    serde_json::to_string_pretty(&map)
        .map_err(|e| EnvSealError::CommandFailed(format!("JSON output: {e}")))
}
