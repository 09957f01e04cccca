use std::fmt;

use serde::{Deserialize, Serialize};

/// A single archived chapter, as stored in one JSON file of the data directory.
///
/// Identity is positional: two chapters with the same title are still distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    /// Chapter title, often prefixed with its number, e.g. "12. La batalla de l'Ebre"
    pub title: String,
    /// Free-text summary of the chapter
    pub description: String,
    /// Source URL the audio was fetched from
    pub link: String,
    /// Thumbnail image URL
    pub image: String,
    /// Audio file name, relative to the data directory
    pub file: String,
}

/// Which chapter field a search term is matched against.
///
/// Selector values other than `title` and `description` are kept as
/// `Unrecognized`; such a query matches no chapter at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Description,
    Unrecognized(String),
}

impl SearchField {
    pub fn as_str(&self) -> &str {
        match self {
            SearchField::Title => "title",
            SearchField::Description => "description",
            SearchField::Unrecognized(value) => value,
        }
    }
}

impl From<&str> for SearchField {
    fn from(value: &str) -> Self {
        match value {
            "title" => SearchField::Title,
            "description" => SearchField::Description,
            other => SearchField::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for SearchField {
    fn from(value: String) -> Self {
        SearchField::from(value.as_str())
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search submission: the raw term and the field to match it against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub field: SearchField,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, field: impl Into<SearchField>) -> Self {
        Self {
            term: term.into(),
            field: field.into(),
        }
    }

    /// Case-insensitive substring test of the term against the selected field.
    ///
    /// An empty term matches every chapter; an unrecognized field matches none.
    pub fn matches(&self, title: &str, description: &str) -> bool {
        self.matches_normalized(&self.term.to_lowercase(), title, description)
    }

    /// Same as [`matches`](Self::matches) with the term already lowercased.
    pub(crate) fn matches_normalized(&self, term: &str, title: &str, description: &str) -> bool {
        let haystack = match &self.field {
            SearchField::Title => title,
            SearchField::Description => description,
            SearchField::Unrecognized(_) => return false,
        };
        haystack.to_lowercase().contains(term)
    }
}

/// Display state of a chapter element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

impl Visibility {
    /// CSS `display` value for this state.
    pub fn display(self) -> &'static str {
        match self {
            Visibility::Shown => "block",
            Visibility::Hidden => "none",
        }
    }

    pub fn is_shown(self) -> bool {
        self == Visibility::Shown
    }
}
