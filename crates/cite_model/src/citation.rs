//! Citation item model - one cited reference plus per-use metadata

use crate::CitationLabel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single cited reference with optional per-use formatting metadata.
///
/// Within one citation a reference id appears at most once, though the same
/// reference may be cited by many different citations across a document.
/// The serialized shape is shared with citation records embedded in host
/// documents, so optional fields are omitted entirely when unset and the
/// suppress-author flag keeps its hyphenated key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationItem {
    /// Unique reference identifier. Immutable once created.
    pub id: String,
    /// Locator category. Treated as `page` by renderers when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<CitationLabel>,
    /// Free-text position reference, e.g. a page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    /// Text rendered immediately before the formatted citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Text rendered immediately after the formatted citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// When true, the formatted citation omits the author name
    #[serde(
        rename = "suppress-author",
        default,
        skip_serializing_if = "is_false"
    )]
    pub suppress_author: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CitationItem {
    /// Create a bare citation item with no metadata
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            locator: None,
            prefix: None,
            suffix: None,
            suppress_author: false,
        }
    }

    /// Set the locator label
    pub fn with_label(mut self, label: CitationLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the locator text
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    /// Set the prefix text
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the suffix text
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Set the suppress-author flag
    pub fn with_suppressed_author(mut self, suppress: bool) -> Self {
        self.suppress_author = suppress;
        self
    }

    /// The label to render with, falling back to the default when unset
    pub fn effective_label(&self) -> CitationLabel {
        self.label.unwrap_or_default()
    }

    /// Copy the metadata fields from `other`, leaving `id` untouched.
    ///
    /// Used when a metadata edit is saved back onto an existing entry: the
    /// entry keeps its identity and position, only the formatting fields
    /// change.
    pub fn apply_metadata(&mut self, other: &CitationItem) {
        self.label = other.label;
        self.locator = other.locator.clone();
        self.prefix = other.prefix.clone();
        self.suffix = other.suffix.clone();
        self.suppress_author = other.suppress_author;
    }
}

/// Order- and field-sensitive structural equality over two citation item
/// sequences.
///
/// Both the working copy and the baseline are rebuilt (new containers) on
/// most mutations, so equality must be computed over the values.
pub fn items_equal(a: &[CitationItem], b: &[CitationItem]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

/// Check that no reference id appears more than once in the sequence
pub fn ids_unique(items: &[CitationItem]) -> bool {
    let mut seen = HashSet::new();
    items.iter().all(|item| seen.insert(item.id.as_str()))
}
