use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("extraction error: {0}")]
    Extraction(String),
    #[error("export error: {0}")]
    Export(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MediaResult<T> = Result<T, MediaError>;
