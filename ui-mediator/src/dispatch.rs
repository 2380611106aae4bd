//! Reference-keyed handler tables
//!
//! A mediator owns one [`DispatchRegistry`] filled in its constructor. Its
//! `notify` implementation is then a single [`DispatchRegistry::call`]; keys
//! without a handler go to the fallback, which by default only traces.

use std::fmt;

use indexmap::IndexMap;

use crate::component::Reference;
use crate::error::MediatorResult;
use crate::value::ChangeRecord;

/// Handler stored in a [`DispatchRegistry`].
pub type Handler<M> = Box<dyn Fn(&M, &Reference, &ChangeRecord) -> MediatorResult<()>>;

/// Mapping from component reference to the handler reacting to it.
pub struct DispatchRegistry<M: ?Sized> {
    handlers: IndexMap<Reference, Handler<M>>,
    fallback: Handler<M>,
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn unrouted<M: ?Sized>(_: &M, reference: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
    crate::mediator_trace!(
        reference = %reference,
        property = %change.name,
        "no handler registered, change ignored"
    );
    Ok(())
}

impl<M: ?Sized + 'static> DispatchRegistry<M> {
    /// Empty registry whose fallback ignores the change.
    pub fn new() -> Self {
        Self::with_fallback(unrouted::<M>)
    }
}

impl<M: ?Sized> DispatchRegistry<M> {
    pub fn with_fallback<F>(fallback: F) -> Self
    where
        F: Fn(&M, &Reference, &ChangeRecord) -> MediatorResult<()> + 'static,
    {
        Self {
            handlers: IndexMap::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Store `handler` under `key`, replacing any earlier one.
    pub fn register<F>(&mut self, key: impl Into<Reference>, handler: F)
    where
        F: Fn(&M, &Reference, &ChangeRecord) -> MediatorResult<()> + 'static,
    {
        self.handlers.insert(key.into(), Box::new(handler));
    }

    /// The handler for `key`, or the fallback.
    pub fn dispatch(&self, key: &Reference) -> &Handler<M> {
        self.handlers.get(key).unwrap_or(&self.fallback)
    }

    pub fn call(&self, mediator: &M, key: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        crate::mediator_trace!(
            reference = %key,
            property = %change.name,
            routed = self.handlers.contains_key(key),
            "dispatching change"
        );
        (self.dispatch(key))(mediator, key, change)
    }

    pub fn contains(&self, key: &Reference) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered keys in registration order.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.handlers.keys()
    }
}

impl<M: ?Sized + 'static> Default for DispatchRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ?Sized> fmt::Debug for DispatchRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRegistry")
            .field("references", &self.handlers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
