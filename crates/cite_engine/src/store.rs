//! Selection state store
//!
//! Holds the working copy (what the user currently has checked, with any
//! metadata edits) and the baseline (the last-known committed state of the
//! citation at the document cursor). Both sequences live in one value so
//! every reader sees a consistent pair; pending edits are detected by
//! value equality, never by container identity.

use crate::EngineState;
use cite_model::{items_equal, CitationItem};
use serde::{Deserialize, Serialize};

/// Working copy and baseline of the citation being composed or edited.
///
/// The working copy is mutated by checkbox toggles and metadata edits; the
/// baseline changes only when the document reports a new cursor context.
/// Insertion order is append-only and removal never reorders the
/// remaining entries, since item order determines rendered citation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionStore {
    selected: Vec<CitationItem>,
    baseline: Vec<CitationItem>,
}

impl SelectionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The working copy, in citation order
    pub fn selected(&self) -> &[CitationItem] {
        &self.selected
    }

    /// The last-known committed citation at the cursor, empty when the
    /// cursor is not inside a citation
    pub fn baseline(&self) -> &[CitationItem] {
        &self.baseline
    }

    /// Check or uncheck a reference.
    ///
    /// Checking appends a bare item when the id is not already present;
    /// unchecking removes the matching entry. Requesting a state that
    /// already holds is a no-op.
    pub fn toggle(&mut self, id: &str, checked: bool) {
        let present = self.selected.iter().any(|item| item.id == id);
        if checked && !present {
            self.selected.push(CitationItem::new(id));
        } else if !checked && present {
            self.selected.retain(|item| item.id != id);
        }
    }

    /// Save a metadata edit onto the matching working-copy entry.
    ///
    /// The entry keeps its id and position; only the metadata fields
    /// change. An id with no matching entry is ignored: the edit panel can
    /// only be opened for an item already in the working copy, so this
    /// branch preserves the invariant instead of failing.
    pub fn update_metadata(&mut self, item: &CitationItem) {
        match self.selected.iter_mut().find(|entry| entry.id == item.id) {
            Some(entry) => entry.apply_metadata(item),
            None => {
                tracing::warn!(id = %item.id, "metadata edit for an unselected reference ignored");
            }
        }
    }

    /// Wholesale replace of the working copy
    pub fn replace_all(&mut self, items: Vec<CitationItem>) {
        self.selected = items;
    }

    /// Empty the working copy
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the baseline
    pub fn set_baseline(&mut self, items: Vec<CitationItem>) {
        self.baseline = items;
    }

    /// Reset the working copy to the current baseline, discarding edits
    pub fn reset_to_baseline(&mut self) {
        self.selected = self.baseline.clone();
    }

    /// Clear both working copy and baseline
    pub fn clear_all(&mut self) {
        self.selected.clear();
        self.baseline.clear();
    }

    /// True iff the working copy is not value-equal to the baseline
    /// (order-sensitive, field-sensitive)
    pub fn has_pending_edits(&self) -> bool {
        !items_equal(&self.selected, &self.baseline)
    }

    /// The engine state implied by the current contents
    pub fn state(&self) -> EngineState {
        if !self.baseline.is_empty() {
            EngineState::Editing
        } else if !self.selected.is_empty() {
            EngineState::Composing
        } else {
            EngineState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cite_model::CitationLabel;
    use proptest::prelude::*;

    fn item(id: &str) -> CitationItem {
        CitationItem::new(id)
    }

    #[test]
    fn test_toggle_appends_in_order() {
        let mut store = SelectionStore::new();
        store.toggle("ref1", true);
        store.toggle("ref2", true);
        store.toggle("ref3", true);

        let ids: Vec<&str> = store.selected().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ref1", "ref2", "ref3"]);
    }

    #[test]
    fn test_toggle_checked_is_idempotent() {
        let mut store = SelectionStore::new();
        store.toggle("ref1", true);
        let once = store.selected().to_vec();

        store.toggle("ref1", true);
        assert_eq!(store.selected(), &once[..]);
    }

    #[test]
    fn test_toggle_unchecked_removes_without_reordering() {
        let mut store = SelectionStore::new();
        store.toggle("ref1", true);
        store.toggle("ref2", true);
        store.toggle("ref3", true);

        store.toggle("ref2", false);

        let ids: Vec<&str> = store.selected().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ref1", "ref3"]);
    }

    #[test]
    fn test_toggle_unchecked_missing_is_noop() {
        let mut store = SelectionStore::new();
        store.toggle("ref1", true);
        store.toggle("ref2", false);
        assert_eq!(store.selected().len(), 1);
    }

    #[test]
    fn test_update_metadata_replaces_fields_in_place() {
        let mut store = SelectionStore::new();
        store.toggle("ref1", true);
        store.toggle("ref2", true);

        let edited = item("ref1")
            .with_label(CitationLabel::Chapter)
            .with_locator("3")
            .with_suppressed_author(true);
        store.update_metadata(&edited);

        let first = &store.selected()[0];
        assert_eq!(first.id, "ref1");
        assert_eq!(first.label, Some(CitationLabel::Chapter));
        assert_eq!(first.locator.as_deref(), Some("3"));
        assert!(first.suppress_author);
        // Position unchanged
        assert_eq!(store.selected()[1].id, "ref2");
    }

    #[test]
    fn test_update_metadata_unknown_id_is_noop() {
        let mut store = SelectionStore::new();
        store.toggle("ref1", true);
        let before = store.selected().to_vec();

        store.update_metadata(&item("ghost").with_locator("7"));

        assert_eq!(store.selected(), &before[..]);
    }

    #[test]
    fn test_has_pending_edits_round_trip() {
        let mut store = SelectionStore::new();
        let baseline = vec![item("ref1"), item("ref2")];
        store.set_baseline(baseline.clone());
        store.replace_all(baseline);
        assert!(!store.has_pending_edits());

        store.toggle("ref3", true);
        assert!(store.has_pending_edits());
    }

    #[test]
    fn test_has_pending_edits_is_field_sensitive() {
        let mut store = SelectionStore::new();
        store.set_baseline(vec![item("ref1"), item("ref2")]);
        store.replace_all(vec![item("ref1"), item("ref2").with_locator("12")]);
        assert!(store.has_pending_edits());
    }

    #[test]
    fn test_reset_to_baseline_restores_exactly() {
        let mut store = SelectionStore::new();
        let baseline = vec![item("ref1").with_locator("5"), item("ref2")];
        store.set_baseline(baseline.clone());
        store.replace_all(baseline.clone());

        store.toggle("ref2", false);
        store.toggle("ref9", true);
        store.update_metadata(&item("ref1").with_locator("99"));
        assert!(store.has_pending_edits());

        store.reset_to_baseline();
        assert_eq!(store.selected(), &baseline[..]);
        assert!(!store.has_pending_edits());
    }

    #[test]
    fn test_store_serialization_roundtrip() {
        let mut store = SelectionStore::new();
        store.toggle("ref1", true);
        store.update_metadata(&item("ref1").with_locator("12"));
        store.set_baseline(vec![item("ref1")]);

        let json = serde_json::to_string(&store).unwrap();
        let restored: SelectionStore = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.selected(), store.selected());
        assert_eq!(restored.baseline(), store.baseline());
        assert!(restored.has_pending_edits());
    }

    #[test]
    fn test_state_derivation() {
        let mut store = SelectionStore::new();
        assert_eq!(store.state(), EngineState::Idle);

        store.toggle("ref1", true);
        assert_eq!(store.state(), EngineState::Composing);

        store.set_baseline(vec![item("ref1")]);
        assert_eq!(store.state(), EngineState::Editing);

        store.clear_all();
        assert_eq!(store.state(), EngineState::Idle);
    }

    proptest! {
        #[test]
        fn prop_double_toggle_equals_single_toggle(ids in proptest::collection::vec("[a-z]{1,5}", 1..10)) {
            let mut once = SelectionStore::new();
            let mut twice = SelectionStore::new();
            for id in &ids {
                once.toggle(id, true);
                twice.toggle(id, true);
                twice.toggle(id, true);
            }
            prop_assert_eq!(once.selected(), twice.selected());
        }

        #[test]
        fn prop_cancel_restores_baseline(
            baseline_ids in proptest::collection::vec("[a-z]{1,5}", 0..6),
            toggles in proptest::collection::vec(("[a-z]{1,5}", proptest::bool::ANY), 0..10),
        ) {
            let mut store = SelectionStore::new();
            let baseline: Vec<CitationItem> = baseline_ids
                .iter()
                .map(|id| CitationItem::new(id.as_str()))
                .collect();
            store.set_baseline(baseline.clone());
            store.reset_to_baseline();

            for (id, checked) in &toggles {
                store.toggle(id, *checked);
            }
            store.reset_to_baseline();

            prop_assert_eq!(store.selected(), &baseline[..]);
            prop_assert!(!store.has_pending_edits());
        }
    }
}
