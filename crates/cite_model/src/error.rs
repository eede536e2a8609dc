//! Error types for the citation model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CiteModelError {
    #[error("Unknown citation label: {0}")]
    UnknownLabel(String),

    #[error("Duplicate reference id in citation: {0}")]
    DuplicateId(String),
}

pub type Result<T> = std::result::Result<T, CiteModelError>;
