//! Citation processor contract
//!
//! The processor turns citation items into formatted text and maintains
//! the document's aggregate bibliography. Formatting itself is external to
//! this crate; the engine only invokes the refresh operation on demand,
//! never automatically after every citation edit.

use thiserror::Error;

/// Errors surfaced by a citation processor
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Citation processing failed: {0}")]
    Processing(String),

    #[error("Unknown citation style: {0}")]
    UnknownStyle(String),
}

pub type ProcessorResult<T> = std::result::Result<T, ProcessorError>;

/// External engine that recomputes the document's bibliography from all
/// citations currently embedded.
pub trait CitationProcessor {
    /// Recompute and return the formatted bibliography text
    fn refresh_bibliography(&self) -> ProcessorResult<String>;
}
