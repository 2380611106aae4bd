#![deny(missing_docs)]
//! Ready-made mediators for `ui-mediator`.
//!
//! The main export is [`FileDialog`], a directory browser and file picker
//! built from ten independent components. Paths travel through its list
//! controls as tagged display strings (see [`PathCodec`]); directory listings
//! come from [`list_directories`] and [`list_files`] over a pluggable
//! [`FileSystem`].
//!
//! ```no_run
//! use ui_mediator::DialogMediator;
//! use ui_mediator_dialogs::FileDialog;
//!
//! let dialog = FileDialog::new(None, Some(vec![("Text", "*.txt").into()]))?;
//! dialog.directory_files().set("index", 0usize)?;
//! dialog.button_select().control().click()?;
//! dialog.button_save().control().click()?;
//! println!("{:?}", dialog.selection());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod codec;
mod config;
mod dialog;
mod enumerate;
mod error;
mod filter;
mod fs;

pub use codec::{Icon, PathCodec};
pub use config::FileDialogConfig;
pub use dialog::{FileDialog, FileDialogBuilder, PLACEHOLDER, names};
pub use enumerate::{list_directories, list_files};
pub use error::{FileDialogError, FileDialogResult};
pub use filter::FileFilter;
pub use fs::{FileSystem, FsEntry, StdFileSystem};
