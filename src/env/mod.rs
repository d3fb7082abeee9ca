//! Environment files: line parsing, in-place patching, and the secret
//! store that encrypts and decrypts variables.

pub mod file;
pub mod parser;
pub mod store;

pub use file::{ensure_file_exists, update_environment_lines, update_environment_variable};
pub use store::{EnvironmentSecretStore, DEFAULT_BASE_ALIAS};
