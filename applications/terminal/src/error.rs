//! Terminal host error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TerminalError>;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] marigold_core::CoreError),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for TerminalError {
    fn from(err: config::ConfigError) -> Self {
        TerminalError::Config(err.to_string())
    }
}
