//! Citation field identity and embedded field contents

use crate::{ids_unique, CitationItem, CiteModelError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a citation field embedded in a host document.
/// Uses UUID v4 for stable IDs that survive serialization round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(Uuid);

impl FieldId {
    /// Create a new random FieldId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a FieldId from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Create a FieldId from a string representation
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for FieldId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<FieldId> for Uuid {
    fn from(id: FieldId) -> Self {
        id.0
    }
}

/// A citation field as embedded in a host document: a stable identity plus
/// the ordered citation items it renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationField {
    id: FieldId,
    items: Vec<CitationItem>,
}

impl CitationField {
    /// Create a field from an ordered item list.
    ///
    /// A reference may be cited at most once per field, so duplicate ids
    /// are rejected.
    pub fn new(items: Vec<CitationItem>) -> Result<Self> {
        Self::with_id(FieldId::new(), items)
    }

    /// Create a field with a known identity
    pub fn with_id(id: FieldId, items: Vec<CitationItem>) -> Result<Self> {
        check_unique(&items)?;
        Ok(Self { id, items })
    }

    /// The field's stable identity
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The ordered citation items in this field
    pub fn items(&self) -> &[CitationItem] {
        &self.items
    }

    /// Replace the field contents, keeping its identity
    pub fn replace_items(&mut self, items: Vec<CitationItem>) -> Result<()> {
        check_unique(&items)?;
        self.items = items;
        Ok(())
    }

    /// Whether the field cites nothing
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn check_unique(items: &[CitationItem]) -> Result<()> {
    if ids_unique(items) {
        return Ok(());
    }
    let mut seen = std::collections::HashSet::new();
    let duplicate = items
        .iter()
        .find(|item| !seen.insert(item.id.as_str()))
        .map(|item| item.id.clone())
        .unwrap_or_default();
    Err(CiteModelError::DuplicateId(duplicate))
}
