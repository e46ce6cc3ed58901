use thiserror::Error;

pub type Result<T> = std::result::Result<T, FwError>;

#[derive(Debug, Error)]
pub enum FwError {
    #[error("config error: {0}")]
    Config(String),

    #[error("size mismatch: {path} is {len} bytes, expected {expected}")]
    SizeMismatch {
        path: String,
        len: u64,
        expected: u64,
    },

    #[error("invalid align of input: {path} must be a multiple of {multiple}")]
    Align { path: String, multiple: u64 },

    #[error("can't open '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("close errors: {0}")]
    Close(String),

    #[error("cancelled")]
    Cancelled,
}
