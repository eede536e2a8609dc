//! Engine states and the commit decision

use cite_model::CitationItem;
use serde::{Deserialize, Serialize};

/// Logical state of the synchronization engine.
///
/// The state is derived from the selection store rather than tracked
/// separately, so it can never drift from the data it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No selection and no pending composition
    Idle,
    /// No citation at the cursor; the user is building a new one
    Composing,
    /// The cursor is inside an existing citation
    Editing,
}

/// The document operation a commit will perform.
///
/// Computed once from the engine state and the working copy, then
/// dispatched. Keeping the three-way branch in one tagged value makes the
/// easy-to-miss cases (removing a citation by unchecking every item while
/// editing) testable in isolation from the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitAction {
    /// Write a new citation at the cursor
    Insert,
    /// Replace the existing citation at the cursor
    Update,
    /// Delete the existing citation at the cursor
    Remove,
    /// Nothing to do
    NoOp,
}

impl CommitAction {
    /// Decide what a commit must do given the current state, the working
    /// copy, and whether the working copy differs from the baseline.
    pub fn compute(
        state: EngineState,
        working_copy: &[CitationItem],
        has_pending_edits: bool,
    ) -> Self {
        match state {
            EngineState::Editing if working_copy.is_empty() => CommitAction::Remove,
            EngineState::Editing if has_pending_edits => CommitAction::Update,
            EngineState::Editing => CommitAction::NoOp,
            EngineState::Composing if !working_copy.is_empty() => CommitAction::Insert,
            EngineState::Composing | EngineState::Idle => CommitAction::NoOp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[&str]) -> Vec<CitationItem> {
        ids.iter().copied().map(CitationItem::new).collect()
    }

    #[test]
    fn test_editing_with_empty_working_copy_removes() {
        let action = CommitAction::compute(EngineState::Editing, &[], true);
        assert_eq!(action, CommitAction::Remove);
    }

    #[test]
    fn test_editing_with_pending_edits_updates() {
        let working = items(&["ref1", "ref2"]);
        let action = CommitAction::compute(EngineState::Editing, &working, true);
        assert_eq!(action, CommitAction::Update);
    }

    #[test]
    fn test_editing_without_pending_edits_is_noop() {
        let working = items(&["ref1"]);
        let action = CommitAction::compute(EngineState::Editing, &working, false);
        assert_eq!(action, CommitAction::NoOp);
    }

    #[test]
    fn test_composing_with_selection_inserts() {
        let working = items(&["ref1"]);
        let action = CommitAction::compute(EngineState::Composing, &working, true);
        assert_eq!(action, CommitAction::Insert);
    }

    #[test]
    fn test_composing_with_empty_selection_is_noop() {
        let action = CommitAction::compute(EngineState::Composing, &[], false);
        assert_eq!(action, CommitAction::NoOp);
    }

    #[test]
    fn test_idle_is_noop() {
        let action = CommitAction::compute(EngineState::Idle, &[], false);
        assert_eq!(action, CommitAction::NoOp);
    }
}
