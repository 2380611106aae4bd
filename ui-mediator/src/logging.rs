//! Logging utilities for mediator-driven UIs
//!
//! Subscriber setup for applications plus the conditional logging macros used
//! throughout this crate and its extensions. Everything compiles to nothing
//! when the `tracing` feature is off.

#[cfg(feature = "tracing")]
use tracing::{debug, info};

/// Initialize a tracing subscriber with sensible defaults
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ui_mediator=info,ui_mediator_dialogs=info,warn".into());

    // `try_init` so a second call (tests, embedding apps) is harmless
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Initialize a tracing subscriber with a custom filter
#[cfg(feature = "tracing")]
pub fn init_tracing_with_filter(filter: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Log a component binding to its mediator
#[cfg(feature = "tracing")]
pub fn log_component_attached(component: &str) {
    debug!("Component {} attached to mediator", component);
}

/// Log a dispatch registry being populated
#[cfg(feature = "tracing")]
pub fn log_registry_ready(mediator: &str, entries: usize) {
    info!("{} mediator ready with {} dispatch entries", mediator, entries);
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {
    eprintln!("Warning: tracing feature not enabled, logging disabled");
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing_with_filter(_filter: &str) {
    eprintln!("Warning: tracing feature not enabled, logging disabled");
}

#[cfg(not(feature = "tracing"))]
pub fn log_component_attached(_component: &str) {}

#[cfg(not(feature = "tracing"))]
pub fn log_registry_ready(_mediator: &str, _entries: usize) {}

/// Macro for conditional tracing
#[macro_export]
macro_rules! mediator_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

/// Macro for conditional debug logging
#[macro_export]
macro_rules! mediator_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

/// Macro for conditional warning logging
#[macro_export]
macro_rules! mediator_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}
