//! Error types for the mediator core
//!
//! Covers misconfigured components, badly shaped property writes and failures
//! raised inside mediator handlers.

use thiserror::Error;

use crate::value::ValueKind;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// Result type for mediator operations
pub type MediatorResult<T> = Result<T, MediatorError>;

/// Errors that can occur while wiring or driving controls
#[derive(Error, Debug)]
pub enum MediatorError {
    /// A control was asked for properties it does not have
    #[error("Configuration error: {control} has no properties named {}", .names.join(", "))]
    Configuration { control: String, names: Vec<String> },

    /// A component was built without any property to observe
    #[error("Configuration error: no properties to observe on {control}")]
    EmptyObservation { control: String },

    /// A property write did not match the declared property kind
    #[error("Type mismatch on `{property}`: expected {expected}, found {found}")]
    TypeMismatch {
        property: String,
        expected: ValueKind,
        found: String,
    },

    /// A selection index outside the current options
    #[error("Index {index} out of range for {len} options")]
    InvalidIndex { index: i64, len: usize },

    /// A selection value or label that is not one of the current options
    #[error("`{value}` is not a valid {property} for the current options")]
    InvalidOption { property: String, value: String },

    /// Failure raised inside a mediator handler
    #[error("Handler error")]
    Handler(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl MediatorError {
    /// Create a configuration error for the given control type and property names
    pub fn configuration<I, S>(control: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let control = control.into();
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        #[cfg(feature = "tracing")]
        warn!("Configuration error: {} lacks {:?}", control, names);
        Self::Configuration { control, names }
    }

    /// Create an empty-observation error
    pub fn empty_observation(control: impl Into<String>) -> Self {
        let control = control.into();
        #[cfg(feature = "tracing")]
        warn!("Configuration error: nothing to observe on {}", control);
        Self::EmptyObservation { control }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        property: impl Into<String>,
        expected: ValueKind,
        found: impl Into<String>,
    ) -> Self {
        let property = property.into();
        let found = found.into();
        #[cfg(feature = "tracing")]
        debug!("Type mismatch on {}: expected {}, found {}", property, expected, found);
        Self::TypeMismatch {
            property,
            expected,
            found,
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();
        #[cfg(feature = "tracing")]
        debug!("Invalid {}: {}", property, value);
        Self::InvalidOption { property, value }
    }
}

/// Trait for converting handler failures to [`MediatorError`]
pub trait IntoMediatorError {
    fn into_mediator_error(self) -> MediatorError;
}

impl<E> IntoMediatorError for E
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_mediator_error(self) -> MediatorError {
        MediatorError::Handler(Box::new(self))
    }
}
