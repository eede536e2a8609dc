//! In-memory host document
//!
//! An in-memory implementation of the [`DocumentAdapter`] contract. It is
//! primarily intended for tests and development, and doubles as a
//! reference adapter for embedders: it models citation fields in document
//! order plus a cursor that is either outside any field or inside one, and
//! fires the registered selection listener when the cursor moves.

use crate::{AdapterError, AdapterResult, DocumentAdapter, SelectionListener};
use cite_model::{CitationField, CitationItem, FieldId};
use std::cell::RefCell;
use std::rc::Rc;

/// Cursor position relative to the document's citation fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Not inside any citation field
    Outside,
    /// Inside the citation field with the given id
    InField(FieldId),
}

/// One recorded `insert_citation` call, for test assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    /// The items written, in order
    pub items: Vec<CitationItem>,
    /// The update flag the caller passed
    pub is_update: bool,
}

struct Inner {
    fields: Vec<CitationField>,
    cursor: Cursor,
    listener: Option<SelectionListener>,
    fail_next_write: bool,
    notify_on_write: bool,
    write_log: Vec<WriteRecord>,
}

/// In-memory host document with citation fields and a movable cursor.
///
/// Cloning produces another handle to the same document, so a test can
/// keep its own handle while the engine owns the adapter.
#[derive(Clone)]
pub struct MemoryDocument {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryDocument {
    /// Create an empty document with the cursor outside any citation
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                fields: Vec::new(),
                cursor: Cursor::Outside,
                listener: None,
                fail_next_write: false,
                notify_on_write: false,
                write_log: Vec::new(),
            })),
        }
    }

    /// Embed a citation field without moving the cursor, as if it already
    /// existed in the document
    pub fn seed_field(&self, items: Vec<CitationItem>) -> AdapterResult<FieldId> {
        let field =
            CitationField::new(items).map_err(|e| AdapterError::FieldCorrupted(e.to_string()))?;
        let id = field.id();
        self.inner.borrow_mut().fields.push(field);
        Ok(id)
    }

    /// Move the cursor inside the given field and notify the listener
    pub fn move_cursor_into(&self, id: FieldId) -> AdapterResult<()> {
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.fields.iter().any(|field| field.id() == id) {
                return Err(AdapterError::Host(format!("no such field: {}", id)));
            }
            inner.cursor = Cursor::InField(id);
        }
        self.fire_selection_changed();
        Ok(())
    }

    /// Move the cursor out of any citation field and notify the listener
    pub fn move_cursor_outside(&self) {
        self.inner.borrow_mut().cursor = Cursor::Outside;
        self.fire_selection_changed();
    }

    /// Current cursor position
    pub fn cursor(&self) -> Cursor {
        self.inner.borrow().cursor
    }

    /// Snapshot of all citation fields in document order
    pub fn fields(&self) -> Vec<CitationField> {
        self.inner.borrow().fields.clone()
    }

    /// Look up a field by id
    pub fn field(&self, id: FieldId) -> Option<CitationField> {
        self.inner
            .borrow()
            .fields
            .iter()
            .find(|field| field.id() == id)
            .cloned()
    }

    /// Make the next write or remove operation fail with a busy host
    pub fn fail_next_write(&self) {
        self.inner.borrow_mut().fail_next_write = true;
    }

    /// Fire a selection-change notification after every successful write,
    /// mimicking hosts whose selection events follow their own edits
    pub fn notify_on_write(&self, enabled: bool) {
        self.inner.borrow_mut().notify_on_write = enabled;
    }

    /// All `insert_citation` calls observed so far
    pub fn write_log(&self) -> Vec<WriteRecord> {
        self.inner.borrow().write_log.clone()
    }

    /// Whether a selection listener is currently registered
    pub fn has_listener(&self) -> bool {
        self.inner.borrow().listener.is_some()
    }

    /// Invoke the registered selection listener, if any.
    ///
    /// The listener is taken out of the document for the duration of the
    /// call so it can itself re-query the adapter without re-entering the
    /// borrow.
    pub fn fire_selection_changed(&self) {
        let listener = self.inner.borrow_mut().listener.take();
        if let Some(mut listener) = listener {
            listener();
            let mut inner = self.inner.borrow_mut();
            if inner.listener.is_none() {
                inner.listener = Some(listener);
            }
        }
    }

    fn take_write_failure(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        std::mem::take(&mut inner.fail_next_write)
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentAdapter for MemoryDocument {
    fn items_in_selected_citation(&self) -> AdapterResult<Vec<CitationItem>> {
        let inner = self.inner.borrow();
        match inner.cursor {
            Cursor::Outside => Ok(Vec::new()),
            Cursor::InField(id) => {
                let field = inner
                    .fields
                    .iter()
                    .find(|field| field.id() == id)
                    .ok_or_else(|| AdapterError::FieldCorrupted(id.to_string()))?;
                Ok(field.items().to_vec())
            }
        }
    }

    fn insert_citation(&self, items: &[CitationItem], is_update: bool) -> AdapterResult<()> {
        if self.take_write_failure() {
            return Err(AdapterError::HostBusy);
        }

        let notify = {
            let mut inner = self.inner.borrow_mut();
            inner.write_log.push(WriteRecord {
                items: items.to_vec(),
                is_update,
            });

            match inner.cursor {
                Cursor::InField(id) => {
                    let field = inner
                        .fields
                        .iter_mut()
                        .find(|field| field.id() == id)
                        .ok_or_else(|| AdapterError::FieldCorrupted(id.to_string()))?;
                    field
                        .replace_items(items.to_vec())
                        .map_err(|e| AdapterError::FieldCorrupted(e.to_string()))?;
                }
                Cursor::Outside => {
                    if is_update {
                        return Err(AdapterError::NoCitationAtCursor);
                    }
                    let field = CitationField::new(items.to_vec())
                        .map_err(|e| AdapterError::FieldCorrupted(e.to_string()))?;
                    let id = field.id();
                    inner.fields.push(field);
                    // The cursor stays inside a freshly written citation
                    inner.cursor = Cursor::InField(id);
                }
            }
            inner.notify_on_write
        };

        if notify {
            self.fire_selection_changed();
        }
        Ok(())
    }

    fn remove_selected_citation(&self) -> AdapterResult<()> {
        if self.take_write_failure() {
            return Err(AdapterError::HostBusy);
        }

        let notify = {
            let mut inner = self.inner.borrow_mut();
            match inner.cursor {
                Cursor::Outside => return Err(AdapterError::NoCitationAtCursor),
                Cursor::InField(id) => {
                    inner.fields.retain(|field| field.id() != id);
                    inner.cursor = Cursor::Outside;
                }
            }
            inner.notify_on_write
        };

        if notify {
            self.fire_selection_changed();
        }
        Ok(())
    }

    fn add_event_listener(&self, listener: SelectionListener) -> AdapterResult<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.listener.is_some() {
            return Err(AdapterError::ListenerAlreadyRegistered);
        }
        inner.listener = Some(listener);
        Ok(())
    }

    fn remove_event_listener(&self) {
        self.inner.borrow_mut().listener = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn items(ids: &[&str]) -> Vec<CitationItem> {
        ids.iter().copied().map(CitationItem::new).collect()
    }

    #[test]
    fn test_cursor_starts_outside() {
        let doc = MemoryDocument::new();
        assert_eq!(doc.cursor(), Cursor::Outside);
        assert!(doc.items_in_selected_citation().unwrap().is_empty());
    }

    #[test]
    fn test_insert_creates_field_and_keeps_cursor_inside() {
        let doc = MemoryDocument::new();
        doc.insert_citation(&items(&["ref1", "ref2"]), false).unwrap();

        assert_eq!(doc.fields().len(), 1);
        let read = doc.items_in_selected_citation().unwrap();
        assert_eq!(read.len(), 2);
        assert!(matches!(doc.cursor(), Cursor::InField(_)));
    }

    #[test]
    fn test_insert_replaces_field_under_cursor() {
        let doc = MemoryDocument::new();
        let id = doc.seed_field(items(&["ref1"])).unwrap();
        doc.move_cursor_into(id).unwrap();

        doc.insert_citation(&items(&["ref1", "ref2"]), true).unwrap();

        assert_eq!(doc.fields().len(), 1);
        assert_eq!(doc.field(id).unwrap().items().len(), 2);
    }

    #[test]
    fn test_update_outside_citation_fails() {
        let doc = MemoryDocument::new();
        let err = doc.insert_citation(&items(&["ref1"]), true).unwrap_err();
        assert!(matches!(err, AdapterError::NoCitationAtCursor));
    }

    #[test]
    fn test_remove_deletes_field_at_cursor() {
        let doc = MemoryDocument::new();
        let id = doc.seed_field(items(&["ref1"])).unwrap();
        doc.move_cursor_into(id).unwrap();

        doc.remove_selected_citation().unwrap();

        assert!(doc.fields().is_empty());
        assert_eq!(doc.cursor(), Cursor::Outside);
    }

    #[test]
    fn test_remove_outside_citation_fails() {
        let doc = MemoryDocument::new();
        let err = doc.remove_selected_citation().unwrap_err();
        assert!(matches!(err, AdapterError::NoCitationAtCursor));
    }

    #[test]
    fn test_injected_failure_is_one_shot() {
        let doc = MemoryDocument::new();
        doc.fail_next_write();

        let err = doc.insert_citation(&items(&["ref1"]), false).unwrap_err();
        assert!(matches!(err, AdapterError::HostBusy));

        doc.insert_citation(&items(&["ref1"]), false).unwrap();
        assert_eq!(doc.fields().len(), 1);
    }

    #[test]
    fn test_failed_write_is_not_logged_as_applied() {
        let doc = MemoryDocument::new();
        doc.fail_next_write();
        let _ = doc.insert_citation(&items(&["ref1"]), false);
        assert!(doc.fields().is_empty());
    }

    #[test]
    fn test_duplicate_listener_registration_fails() {
        let doc = MemoryDocument::new();
        doc.add_event_listener(Box::new(|| {})).unwrap();

        let err = doc.add_event_listener(Box::new(|| {})).unwrap_err();
        assert!(matches!(err, AdapterError::ListenerAlreadyRegistered));

        doc.remove_event_listener();
        doc.add_event_listener(Box::new(|| {})).unwrap();
    }

    #[test]
    fn test_cursor_moves_fire_listener() {
        let doc = MemoryDocument::new();
        let id = doc.seed_field(items(&["ref1"])).unwrap();

        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        doc.add_event_listener(Box::new(move || {
            counter.set(counter.get() + 1);
        }))
        .unwrap();

        doc.move_cursor_into(id).unwrap();
        doc.move_cursor_outside();

        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_listener_can_requery_document() {
        let doc = MemoryDocument::new();
        let id = doc.seed_field(items(&["ref1"])).unwrap();

        let handle = doc.clone();
        let seen = Rc::new(Cell::new(0));
        let seen_in_listener = Rc::clone(&seen);
        doc.add_event_listener(Box::new(move || {
            let items = handle.items_in_selected_citation().unwrap();
            seen_in_listener.set(items.len());
        }))
        .unwrap();

        doc.move_cursor_into(id).unwrap();
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_write_log_records_items_and_flag() {
        let doc = MemoryDocument::new();
        doc.insert_citation(&items(&["ref1"]), false).unwrap();
        doc.insert_citation(&items(&["ref1", "ref2"]), true).unwrap();

        let log = doc.write_log();
        assert_eq!(log.len(), 2);
        assert!(!log[0].is_update);
        assert!(log[1].is_update);
        assert_eq!(log[1].items.len(), 2);
    }
}
