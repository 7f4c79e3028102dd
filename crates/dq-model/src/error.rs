use thiserror::Error;

#[derive(Debug, Error)]
pub enum DqError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("ingest error: {0}")]
    Ingest(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, DqError>;
