use thiserror::Error;

#[derive(Debug, Error)]
pub enum RangeError {
    #[error("Invalid comparator: {0}")]
    InvalidComparator(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid hyphen range: {0}")]
    InvalidHyphenRange(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
