//! Error types for engine operations

use crate::{AdapterError, ProcessorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Document adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Citation processor error: {0}")]
    Processor(#[from] ProcessorError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
