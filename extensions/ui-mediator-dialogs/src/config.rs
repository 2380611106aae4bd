use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::filter::FileFilter;

/// Plain-data description of a [`FileDialog`](crate::FileDialog).
///
/// ```
/// use ui_mediator_dialogs::{FileDialogConfig, FileFilter};
///
/// let config = FileDialogConfig {
///     root: Some("/srv/data".into()),
///     filters: Some(vec![FileFilter::new("CSV", "*.csv")]),
///     ..Default::default()
/// };
/// assert!(config.recursive);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FileDialogConfig {
    /// Dialog name; defaults to `FileDialog`
    pub name: Option<String>,
    /// Directory the dialog browses from; defaults to the current directory
    pub root: Option<PathBuf>,
    /// Filter choices; `None` or empty shows a hidden match-all filter
    pub filters: Option<Vec<FileFilter>>,
    /// Whether directory discovery searches below the root
    pub recursive: bool,
}

impl Default for FileDialogConfig {
    fn default() -> Self {
        Self {
            name: None,
            root: None,
            filters: None,
            recursive: true,
        }
    }
}
