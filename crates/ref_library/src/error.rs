//! Error types for library operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSONL at line {line}: {message}")]
    Jsonl { line: usize, message: String },

    #[error("Duplicate reference id: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
