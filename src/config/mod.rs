//! Configuration: project settings and the loaded environment cache.

pub mod environment;
pub mod settings;

pub use environment::EnvironmentConfig;
pub use settings::Settings;
