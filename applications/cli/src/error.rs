/// Configuration errors
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// File or environment source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values loaded but not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
