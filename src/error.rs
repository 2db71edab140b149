use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// External binary missing or could not be spawned
    #[error("Failed to execute {tool}: {message}")]
    Tool { tool: String, message: String },

    #[error("Probe failed: {0}")]
    Probe(String),

    #[error("Extraction of stream {index} from {} failed: {message}", .source_path.display())]
    Extraction {
        source_path: PathBuf,
        index: usize,
        message: String,
    },

    #[error("Invalid subtitle at line {line}: {message}")]
    Subtitle { line: usize, message: String },

    #[error("Merge failed: {0}")]
    Merge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn subtitle(line: usize, message: impl Into<String>) -> Self {
        AppError::Subtitle {
            line,
            message: message.into(),
        }
    }
}
