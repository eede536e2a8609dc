//! Synchronization engine
//!
//! Reconciles the selection store with the citation embedded at the host
//! document's cursor. All mutations happen on one logical thread; the only
//! asynchronous boundary is the adapter, whose calls may block on a host
//! round trip. A selection-change notification that arrives while a commit
//! is in flight is deferred and replayed once the commit resolves, so the
//! baseline is never clobbered mid-write.

use crate::{
    CitationProcessor, CommitAction, DocumentAdapter, EngineState, Result, SelectionStore,
};
use cite_model::{items_equal, CitationItem};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Availability of the commit/cancel affordances, computed from one
/// consistent read of the selection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelStatus {
    /// Current engine state
    pub state: EngineState,
    /// Number of items in the working copy
    pub selected_count: usize,
    /// Show the insert affordance (composing a new citation)
    pub shows_insert: bool,
    /// Show the save-changes/cancel pair (editing an existing citation)
    pub shows_save: bool,
    /// Commit is enabled
    pub can_commit: bool,
    /// Cancel is enabled
    pub can_cancel: bool,
}

/// The citation selection synchronization engine.
///
/// Owns the selection store and a handle to the host document adapter.
/// Reacts to library toggles, metadata edits, selection-change
/// notifications, and explicit commit/cancel commands.
pub struct SyncEngine<D: DocumentAdapter + ?Sized> {
    /// Host document boundary
    adapter: Rc<D>,
    /// Working copy and baseline
    store: SelectionStore,
    /// Set by the selection listener when a notification arrives while the
    /// engine is busy committing; drained when the commit resolves
    deferred_refresh: Rc<Cell<bool>>,
}

impl<D: DocumentAdapter + ?Sized> SyncEngine<D> {
    /// Create an engine over the given adapter
    pub fn new(adapter: Rc<D>) -> Self {
        Self {
            adapter,
            store: SelectionStore::new(),
            deferred_refresh: Rc::new(Cell::new(false)),
        }
    }

    /// The host document adapter
    pub fn adapter(&self) -> &Rc<D> {
        &self.adapter
    }

    /// Read-only view of the selection store
    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Current engine state
    pub fn state(&self) -> EngineState {
        self.store.state()
    }

    /// Check or uncheck a reference in the working copy
    pub fn toggle(&mut self, id: &str, checked: bool) {
        self.store.toggle(id, checked);
    }

    /// Save a metadata edit onto the matching working-copy entry
    pub fn update_metadata(&mut self, item: &CitationItem) {
        self.store.update_metadata(item);
    }

    /// React to a selection-change notification from the host document.
    ///
    /// Re-queries the adapter for the citation at the new cursor position:
    /// a non-empty result that differs from the baseline replaces both the
    /// baseline and the working copy; an empty result clears both when a
    /// baseline exists; an empty result with an already-empty baseline
    /// changes nothing, so a pending composition survives cursor movement
    /// outside citations.
    pub fn refresh_from_document(&mut self) -> Result<()> {
        let items = self.adapter.items_in_selected_citation()?;

        if !items.is_empty() {
            if !items_equal(&items, self.store.baseline()) {
                tracing::debug!(count = items.len(), "cursor entered a citation");
                self.store.clear();
                self.store.replace_all(items.clone());
                self.store.set_baseline(items);
            }
        } else if !self.store.baseline().is_empty() {
            tracing::debug!("cursor left the citation");
            self.store.clear_all();
        }

        Ok(())
    }

    /// The document operation the next commit will perform
    pub fn pending_action(&self) -> CommitAction {
        CommitAction::compute(
            self.store.state(),
            self.store.selected(),
            self.store.has_pending_edits(),
        )
    }

    /// Execute the commit command ("Insert" / "Save changes").
    ///
    /// Dispatches the computed [`CommitAction`]: an empty working copy
    /// while editing degrades to a remove, otherwise the working copy is
    /// written with the update flag reflecting whether an existing
    /// citation is being replaced. On success both sequences are cleared;
    /// the baseline is re-populated by the next selection-change round
    /// trip rather than optimistically, since formatting and collision
    /// resolution happen in the citation processor. On failure no state
    /// changes.
    pub fn commit(&mut self) -> Result<CommitAction> {
        let action = self.pending_action();
        tracing::debug!(?action, "commit requested");

        let outcome = match action {
            CommitAction::NoOp => Ok(()),
            CommitAction::Remove => self.adapter.remove_selected_citation(),
            CommitAction::Insert => self.adapter.insert_citation(self.store.selected(), false),
            CommitAction::Update => self.adapter.insert_citation(self.store.selected(), true),
        };

        match outcome {
            Ok(()) => {
                if action != CommitAction::NoOp {
                    self.store.clear_all();
                }
                self.replay_deferred();
                Ok(action)
            }
            Err(e) => {
                tracing::warn!(error = %e, ?action, "commit failed, state unchanged");
                self.replay_deferred();
                Err(e.into())
            }
        }
    }

    /// Execute the cancel/undo command: reset the working copy to the
    /// current baseline
    pub fn cancel(&mut self) {
        self.store.reset_to_baseline();
    }

    /// Snapshot of which affordances are shown and enabled.
    ///
    /// Commit is enabled only while pending edits exist; when editing with
    /// no pending edits, commit and cancel are both disabled.
    pub fn panel_status(&self) -> PanelStatus {
        let state = self.store.state();
        let has_pending = self.store.has_pending_edits();
        PanelStatus {
            state,
            selected_count: self.store.selected().len(),
            shows_insert: state == EngineState::Composing,
            shows_save: state == EngineState::Editing,
            can_commit: has_pending,
            can_cancel: has_pending,
        }
    }

    /// Ask the citation processor to recompute the aggregate bibliography.
    ///
    /// Invoked on demand by an explicit user action, never automatically
    /// after a citation edit.
    pub fn sync_bibliography<P: CitationProcessor>(&self, processor: &P) -> Result<String> {
        let bibliography = processor.refresh_bibliography()?;
        tracing::debug!(len = bibliography.len(), "bibliography refreshed");
        Ok(bibliography)
    }

    /// Flag shared with the selection listener for deferring notifications
    /// that arrive while the engine is borrowed
    pub(crate) fn deferred_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.deferred_refresh)
    }

    /// Replay a selection-change notification that arrived mid-commit
    fn replay_deferred(&mut self) {
        if self.deferred_refresh.replace(false) {
            tracing::debug!("replaying deferred selection change");
            if let Err(e) = self.refresh_from_document() {
                tracing::warn!(error = %e, "deferred selection refresh failed");
            }
        }
    }
}

/// Subscription handle tying the engine to the adapter's selection events.
///
/// The listener is registered when the subscription is created and removed
/// exactly once when the handle is dropped, so repeated engine
/// instantiations cannot leak listeners.
pub struct SelectionSubscription<D: DocumentAdapter + ?Sized> {
    adapter: Rc<D>,
}

impl<D: DocumentAdapter + ?Sized> std::fmt::Debug for SelectionSubscription<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSubscription").finish_non_exhaustive()
    }
}

impl<D: DocumentAdapter + ?Sized + 'static> SyncEngine<D> {
    /// Register the engine as the adapter's selection listener.
    ///
    /// The engine is shared with the callback through `Rc<RefCell<_>>`;
    /// the callback holds a weak handle, so dropping the engine makes
    /// further notifications no-ops. A notification that fires while the
    /// engine is already borrowed (a commit in flight) is deferred and
    /// replayed when the commit resolves.
    pub fn attach(engine: &Rc<RefCell<SyncEngine<D>>>) -> Result<SelectionSubscription<D>> {
        let (adapter, deferred) = {
            let engine = engine.borrow();
            (Rc::clone(&engine.adapter), engine.deferred_flag())
        };

        let weak = Rc::downgrade(engine);
        adapter.add_event_listener(Box::new(move || {
            if let Some(engine) = weak.upgrade() {
                match engine.try_borrow_mut() {
                    Ok(mut engine) => {
                        if let Err(e) = engine.refresh_from_document() {
                            tracing::warn!(error = %e, "selection refresh failed");
                        }
                    }
                    Err(_) => deferred.set(true),
                }
            }
        }))?;

        Ok(SelectionSubscription { adapter })
    }
}

impl<D: DocumentAdapter + ?Sized> Drop for SelectionSubscription<D> {
    fn drop(&mut self) {
        self.adapter.remove_event_listener();
    }
}
