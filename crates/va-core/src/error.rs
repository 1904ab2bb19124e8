use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AllocatorError {
    #[error("registration sheet is missing required column '{0}'")]
    MissingField(String),

    #[error("invalid history roster: {0}")]
    InvalidHistory(String),

    #[error("failed to read spreadsheet: {0}")]
    Parse(String),

    #[error("malformed time window '{0}'")]
    MalformedWindow(String),

    #[error("invalid capacity: {0}")]
    InvalidCapacity(String),

    #[error("config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to write roster: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AllocatorError>;
