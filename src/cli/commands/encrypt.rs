//! `envseal encrypt` — replace plaintext variables with encrypted blobs.

use crate::cli::output;
use crate::cli::{load_settings, resolve_key_type, validate_alias, Cli};
use crate::config::EnvironmentConfig;
use crate::env::EnvironmentSecretStore;
use crate::errors::{EnvSealError, Result};
use crate::registry::SecretKeyRegistry;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, alias: &str, names: &[String], key_type: Option<&str>) -> Result<()> {
    validate_alias(alias)?;
    let settings = load_settings(cli)?;
    let key_type = resolve_key_type(&settings, alias, key_type);

    let env_path = settings.environment_path(&cli.project_dir, alias);
    if !env_path.exists() {
        return Err(EnvSealError::CommandFailed(format!(
            "no environment file for '{alias}' at {}",
            env_path.display()
        )));
    }

    let config = EnvironmentConfig::from_settings(&cli.project_dir, &settings, &[alias])?;
    let registry = SecretKeyRegistry::from_config(&config, [&key_type])?;
    let store =
        EnvironmentSecretStore::new(&config, &registry).with_base_alias(&settings.base_alias);

    store.encrypt_variables(&env_path, alias, &key_type, names)?;

    output::success(&format!(
        "Encrypted {} variable(s) in {}",
        names.len(),
        env_path.display()
    ));

    Ok(())
}
