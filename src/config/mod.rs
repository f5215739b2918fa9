/// Database configuration and connection management
pub mod database;

/// Business settings from config.toml and deployment settings from the environment
pub mod settings;

pub use settings::Settings;
