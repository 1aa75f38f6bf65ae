use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or writing settings and pricing files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to encode settings: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("invalid pricing file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("decimals must be at most 6, got {0}")]
    InvalidDecimals(usize),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
