//! Error handling for the text baselines library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextBaselinesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Type mismatch at index {index}: expected {expected}, got {found}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Plot rendering error: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, TextBaselinesError>;

impl TextBaselinesError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TextBaselinesError::InvalidArgument(msg.into())
    }
}

