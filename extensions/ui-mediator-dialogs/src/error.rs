use thiserror::Error;
use ui_mediator::{IntoMediatorError, MediatorError};

/// Result type for dialog construction and enumeration
pub type FileDialogResult<T> = Result<T, FileDialogError>;

/// Errors returned by the file dialog and the directory enumerator
#[derive(Error, Debug)]
pub enum FileDialogError {
    /// I/O error while enumerating
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Filter pattern is not a valid glob
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        /// Pattern as given
        pattern: String,
        /// Parser error
        #[source]
        source: globset::Error,
    },
    /// Failure while wiring or driving the dialog's components
    #[error(transparent)]
    Mediator(#[from] MediatorError),
}

impl From<FileDialogError> for MediatorError {
    fn from(err: FileDialogError) -> Self {
        match err {
            FileDialogError::Mediator(inner) => inner,
            other => other.into_mediator_error(),
        }
    }
}
