use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in envseal.
#[derive(Debug, Error)]
pub enum EnvSealError {
    // --- Input errors ---
    #[error("Invalid input: {0}")]
    Validation(String),

    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: tag mismatch — wrong key or corrupted ciphertext")]
    AuthenticationFailed,

    #[error("Malformed encrypted value: {0}")]
    MalformedBlob(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Failed to decrypt variable '{name}': {source}")]
    VariableDecryption {
        name: String,
        #[source]
        source: Box<EnvSealError>,
    },

    // --- Lookup errors ---
    #[error("Environment variable '{name}' not found for alias '{alias}'")]
    MissingVariable { alias: String, name: String },

    #[error("Secret key '{key_type}' not found for alias '{alias}'")]
    SecretKeyNotFound { alias: String, key_type: String },

    // --- IO errors ---
    #[error("Cannot access {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl EnvSealError {
    /// Wrap an `io::Error` with the path that was being accessed.
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for failures raised while decrypting a blob,
    /// including ones wrapped by a per-variable decrypt.
    pub fn is_decryption_failure(&self) -> bool {
        match self {
            Self::AuthenticationFailed | Self::MalformedBlob(_) | Self::Decryption(_) => true,
            Self::VariableDecryption { source, .. } => source.is_decryption_failure(),
            _ => false,
        }
    }

    /// Returns `true` when the AEAD tag did not verify.
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            Self::AuthenticationFailed => true,
            Self::VariableDecryption { source, .. } => source.is_authentication_failure(),
            _ => false,
        }
    }
}

/// Convenience type alias for envseal results.
pub type Result<T> = std::result::Result<T, EnvSealError>;
