//! Reference library storage, loading, and search

use crate::{LibraryError, Result};
use cite_model::ReferenceRecord;
use std::collections::HashSet;
use std::path::Path;

/// An ordered collection of bibliographic records.
///
/// Records keep the order of the source file; search returns matches in
/// that same order. Reference ids are unique within a library.
#[derive(Debug, Clone, Default)]
pub struct Library {
    records: Vec<ReferenceRecord>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a library from records, rejecting duplicate ids
    pub fn from_records(records: Vec<ReferenceRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(LibraryError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Load a library from a references file.
    ///
    /// Two formats are accepted: a JSON array of records, or JSONL with one
    /// record per line (blank lines are skipped).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let library = Self::parse(&content)?;
        tracing::debug!(
            records = library.len(),
            path = %path.as_ref().display(),
            "loaded reference library"
        );
        Ok(library)
    }

    /// Parse library content in JSON array or JSONL form
    pub fn parse(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();
        if trimmed.is_empty() {
            return Ok(Self::new());
        }

        if trimmed.starts_with('[') {
            let records: Vec<ReferenceRecord> = serde_json::from_str(trimmed)?;
            return Self::from_records(records);
        }

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: ReferenceRecord =
                serde_json::from_str(line).map_err(|e| LibraryError::Jsonl {
                    line: index + 1,
                    message: e.to_string(),
                })?;
            records.push(record);
        }
        Self::from_records(records)
    }

    /// Save the library as a pretty-printed JSON array
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// All matching records, in library order.
    ///
    /// A blank keyword returns every record, matching the list's behavior
    /// when the search box is empty.
    pub fn search(&self, keyword: &str) -> Vec<&ReferenceRecord> {
        self.records
            .iter()
            .filter(|record| record.matches(keyword))
            .collect()
    }

    /// Look up a record by reference id
    pub fn get(&self, id: &str) -> Option<&ReferenceRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Number of records in the library
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the library holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in library order
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRecord> {
        self.records.iter()
    }
}
