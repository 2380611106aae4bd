//! # ui-mediator
//!
//! Mediator-pattern plumbing for observable UI controls. Controls never talk
//! to each other: each one is wrapped in a [`Component`] that forwards its
//! property changes to a [`Mediator`], and the mediator decides (usually via a
//! [`DispatchRegistry`]) which handler reacts and which other controls to
//! update.
//!
//! ## Features
//!
//! - Headless control model ([`Control`]) with typed, observable properties
//! - Components with validated observation and weak mediator back-references
//! - Reference-keyed dispatch with a fallback handler
//! - Observable dialog state for [`DialogMediator`] implementations
//!
//! ## Quick Start
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::{Rc, Weak};
//! use ui_mediator::*;
//!
//! struct Counter {
//!     clicks: Cell<u32>,
//!     registry: DispatchRegistry<Counter>,
//! }
//!
//! impl Mediator for Counter {
//!     fn notify(&self, reference: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
//!         self.registry.call(self, reference, change)
//!     }
//! }
//!
//! let mut registry = DispatchRegistry::new();
//! registry.register("ok", |counter: &Counter, _: &Reference, _: &ChangeRecord| {
//!     counter.clicks.set(counter.clicks.get() + 1);
//!     Ok(())
//! });
//! let counter = Rc::new(Counter { clicks: Cell::new(0), registry });
//!
//! let ok = Component::builder(Control::button()).name("ok").build()?;
//! let mediator: Weak<dyn Mediator> = Rc::downgrade(&counter) as Weak<dyn Mediator>;
//! ok.attach(&mediator);
//!
//! ok.control().click()?;
//! assert_eq!(counter.clicks.get(), 1);
//! # Ok::<(), MediatorError>(())
//! ```

#![deny(rust_2018_idioms)]

pub use self::component::*;
pub use self::control::*;
pub use self::dispatch::*;
pub use self::error::*;
pub use self::host::*;
pub use self::mediator::*;
pub use self::value::*;

mod component;
mod control;
mod dispatch;
mod error;
mod host;
pub mod logging;
mod mediator;
mod value;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
