//! Locator label enumeration

use crate::CiteModelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Locator category attached to a citation item.
///
/// The variants match the label vocabulary understood by citation
/// processors; the serialized form is the lowercase label name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationLabel {
    Column,
    Figure,
    Book,
    Chapter,
    Volume,
    Page,
    Folio,
    Issue,
    Opus,
    Part,
    Line,
    Note,
    Section,
    Paragraph,
}

impl Default for CitationLabel {
    fn default() -> Self {
        CitationLabel::Page
    }
}

impl CitationLabel {
    /// All labels, in the order presented by label pickers
    pub const ALL: [CitationLabel; 14] = [
        CitationLabel::Column,
        CitationLabel::Figure,
        CitationLabel::Book,
        CitationLabel::Chapter,
        CitationLabel::Volume,
        CitationLabel::Page,
        CitationLabel::Folio,
        CitationLabel::Issue,
        CitationLabel::Opus,
        CitationLabel::Part,
        CitationLabel::Line,
        CitationLabel::Note,
        CitationLabel::Section,
        CitationLabel::Paragraph,
    ];

    /// Get the serialized label name
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationLabel::Column => "column",
            CitationLabel::Figure => "figure",
            CitationLabel::Book => "book",
            CitationLabel::Chapter => "chapter",
            CitationLabel::Volume => "volume",
            CitationLabel::Page => "page",
            CitationLabel::Folio => "folio",
            CitationLabel::Issue => "issue",
            CitationLabel::Opus => "opus",
            CitationLabel::Part => "part",
            CitationLabel::Line => "line",
            CitationLabel::Note => "note",
            CitationLabel::Section => "section",
            CitationLabel::Paragraph => "paragraph",
        }
    }
}

impl std::fmt::Display for CitationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CitationLabel {
    type Err = CiteModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CitationLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| CiteModelError::UnknownLabel(s.to_string()))
    }
}
