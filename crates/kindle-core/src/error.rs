//! Error types for Kindle

use thiserror::Error;

/// The main error type for Kindle operations
#[derive(Debug, Error)]
pub enum KindleError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Resource load error: {0}")]
    ResourceLoad(String),

    #[error("Audio error: {0}")]
    AudioError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Layer {index} out of range (layer count is {count})")]
    LayerOutOfRange { index: usize, count: usize },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Kindle operations
pub type Result<T> = std::result::Result<T, KindleError>;

impl From<toml::de::Error> for KindleError {
    fn from(err: toml::de::Error) -> Self {
        KindleError::TomlParseError(err.to_string())
    }
}
