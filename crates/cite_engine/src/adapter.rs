//! Host document adapter contract
//!
//! The adapter is the only document-facing boundary: it reads and writes
//! the citation at the cursor and reports cursor movement. Calls may
//! involve a host round trip, so every operation returns a result and the
//! engine never assumes success.

use cite_model::CitationItem;
use thiserror::Error;

/// Errors surfaced by a host document adapter
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Host document is busy")]
    HostBusy,

    #[error("No citation at the current cursor position")]
    NoCitationAtCursor,

    #[error("Citation field is corrupted: {0}")]
    FieldCorrupted(String),

    #[error("A selection listener is already registered")]
    ListenerAlreadyRegistered,

    #[error("Host document error: {0}")]
    Host(String),
}

pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Callback invoked on every cursor/selection change in the host document.
///
/// The notification carries no payload: the listener must re-query the
/// adapter for the citation at the new cursor position.
pub type SelectionListener = Box<dyn FnMut()>;

/// Integration point for reading and writing the citation at the document
/// cursor and observing cursor movement.
///
/// An empty item list from [`items_in_selected_citation`] means the cursor
/// is not inside a citation. At most one selection listener may be
/// registered at a time; registering a second one without removing the
/// first fails with [`AdapterError::ListenerAlreadyRegistered`].
///
/// [`items_in_selected_citation`]: DocumentAdapter::items_in_selected_citation
pub trait DocumentAdapter {
    /// Read the citation at the current cursor, empty if the cursor is not
    /// inside one. Safe to call repeatedly.
    fn items_in_selected_citation(&self) -> AdapterResult<Vec<CitationItem>>;

    /// Write or replace the citation at the cursor with exactly `items`,
    /// in the given order. `is_update` distinguishes replacing an existing
    /// citation from inserting a new one.
    fn insert_citation(&self, items: &[CitationItem], is_update: bool) -> AdapterResult<()>;

    /// Delete the citation field at the cursor
    fn remove_selected_citation(&self) -> AdapterResult<()>;

    /// Register the selection-change listener
    fn add_event_listener(&self, listener: SelectionListener) -> AdapterResult<()>;

    /// Remove the current selection-change listener, if any
    fn remove_event_listener(&self);
}
