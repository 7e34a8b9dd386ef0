use thiserror::Error;

/// Errors that can occur while loading the board configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur while encoding or delivering an exported image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    /// The browser refused one of the download steps (blob, object URL, anchor)
    #[error("Browser download failed: {0}")]
    Browser(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
