use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
