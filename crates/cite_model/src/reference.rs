//! Bibliographic reference records and the library search predicate

use serde::{Deserialize, Serialize};

/// Publication year as stored in reference data.
///
/// Reference files in the wild carry the year either as a number or as a
/// string, so both forms are accepted and compared textually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A bibliographic record in the reference library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Unique reference identifier, shared with citation items
    pub id: String,
    /// Entry type, e.g. "article-journal" or "book"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
    /// Work title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author display string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Journal or container title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    /// Publication year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
}

impl ReferenceRecord {
    /// Create a record with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ref_type: None,
            title: None,
            author: None,
            journal: None,
            year: None,
        }
    }

    /// Set the entry type
    pub fn with_type(mut self, ref_type: impl Into<String>) -> Self {
        self.ref_type = Some(ref_type.into());
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author display string
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the journal title
    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    /// Set the publication year
    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(Year::Number(year));
        self
    }

    /// Library filter predicate: case-insensitive substring match against
    /// title, author, and year. A blank keyword matches every record.
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return true;
        }

        let year = self.year.as_ref().map(|y| y.to_string());
        let matched = [self.title.as_deref(), self.author.as_deref(), year.as_deref()]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&keyword));
        matched
    }
}
