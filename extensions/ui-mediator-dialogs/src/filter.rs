#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use ui_mediator::OptionPair;

/// File filter (e.g., "Text" -> "*.txt").
///
/// The pattern is a glob matched against paths relative to the dialog root.
/// An empty label means the filter is not worth showing on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileFilter {
    /// Filter display name
    pub label: String,
    /// Glob pattern (e.g., "*.txt")
    pub pattern: String,
}

impl FileFilter {
    /// Create a filter from a label and a glob pattern.
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }

    /// Unlabelled filter matching everything; used when no filters are given.
    pub fn match_all() -> Self {
        Self::new("", "*")
    }

    /// This filter as a `(label, value)` option of a selection control.
    pub fn to_option(&self) -> OptionPair {
        (self.label.clone(), self.pattern.clone())
    }
}

impl From<(&str, &str)> for FileFilter {
    fn from((label, pattern): (&str, &str)) -> Self {
        Self::new(label, pattern)
    }
}

impl From<(String, String)> for FileFilter {
    fn from((label, pattern): (String, String)) -> Self {
        Self { label, pattern }
    }
}
