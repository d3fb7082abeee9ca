//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::{EnvSealError, Result};

/// envseal CLI: encrypt credentials stored in environment files.
#[derive(Parser)]
#[command(
    name = "envseal",
    about = "Encrypts credentials stored in environment files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory holding .envseal.toml and the environment files
    #[arg(long, default_value = ".", global = true, env = "ENVSEAL_PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a master key and store it in the base environment file
    Keygen {
        /// Environment alias the key protects (e.g. UAT)
        alias: String,
        /// Variable name for the key (default: <ALIAS>_SECRET_KEY)
        #[arg(long)]
        key_type: Option<String>,
        /// Replace an existing key without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Encrypt variables in place in an environment file
    Encrypt {
        /// Environment alias whose file is rewritten (e.g. UAT)
        alias: String,
        /// Variable names to encrypt
        #[arg(required = true)]
        names: Vec<String>,
        /// Variable name of the master key (default: <ALIAS>_SECRET_KEY)
        #[arg(long)]
        key_type: Option<String>,
    },

    /// Decrypt variables and print them
    Decrypt {
        /// Environment alias to read from (e.g. UAT)
        alias: String,
        /// Variable names to decrypt
        #[arg(required = true)]
        names: Vec<String>,
        /// Variable name of the master key (default: <ALIAS>_SECRET_KEY)
        #[arg(long)]
        key_type: Option<String>,
        /// Output format: env (default) or json
        #[arg(short, long, default_value = "env")]
        format: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.envseal.toml` from the project directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&cli.project_dir)
}

/// The key type to use: the explicit flag, else the settings default.
pub fn resolve_key_type(settings: &Settings, alias: &str, key_type: Option<&str>) -> String {
    key_type.map_or_else(|| settings.key_type_for(alias), str::to_string)
}

/// Validate that an environment alias is safe and sensible.
///
/// Allowed: ASCII letters, digits, underscores, hyphens. Must not be
/// empty or start with a hyphen. Max length 64 characters.
/// Aliases end up in file names, so path separators are refused.
pub fn validate_alias(alias: &str) -> Result<()> {
    if alias.is_empty() {
        return Err(EnvSealError::Validation(
            "environment alias cannot be empty".into(),
        ));
    }

    if alias.len() > 64 {
        return Err(EnvSealError::Validation(
            "environment alias cannot exceed 64 characters".into(),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(EnvSealError::Validation(format!(
            "environment alias '{alias}' is invalid — only letters, digits, underscores, and hyphens are allowed"
        )));
    }

    if alias.starts_with('-') {
        return Err(EnvSealError::Validation(format!(
            "environment alias '{alias}' cannot start with a hyphen"
        )));
    }

    Ok(())
}
