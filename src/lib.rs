pub mod cli;
pub mod config;
pub mod crypto;
pub mod env;
pub mod errors;
pub mod registry;
