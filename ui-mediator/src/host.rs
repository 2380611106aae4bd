//! Observable property tables
//!
//! [`PropertyHost`] is the piece every observable thing in this crate is built
//! from: a typed, named property table plus a list of observers. Controls use
//! one for their widget state and dialogs use one for the state they expose to
//! the host application.
//!
//! Hosts are single-threaded handles (`Rc<RefCell<..>>`). No borrow of the
//! table is held while observers run, so an observer may freely read or write
//! the host that notified it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::error::{MediatorError, MediatorResult};
use crate::value::{ChangeRecord, Value, ValueKind};

/// Identity of a property host, unique for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostId(u64);

impl HostId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle returned by [`PropertyHost::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Callback invoked with every change of an observed property.
pub type Observer = Rc<dyn Fn(&ChangeRecord) -> MediatorResult<()>>;

/// Declaration of one property: its kind, whether it accepts [`Value::None`], and its default.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertySpec {
    pub kind: ValueKind,
    pub nullable: bool,
    pub default: Value,
}

impl PropertySpec {
    /// Non-nullable property with a default value.
    pub fn new(kind: ValueKind, default: impl Into<Value>) -> Self {
        Self {
            kind,
            nullable: false,
            default: default.into(),
        }
    }

    /// Nullable property starting out as [`Value::None`].
    pub fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
            default: Value::None,
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match value.kind() {
            Some(kind) => kind == self.kind,
            None => self.nullable,
        }
    }
}

struct Slot {
    spec: PropertySpec,
    value: Value,
}

struct Registration {
    id: ObserverId,
    names: Vec<String>,
    observer: Observer,
}

struct HostInner {
    id: HostId,
    type_name: String,
    slots: IndexMap<String, Slot>,
    observers: Vec<Registration>,
    next_observer: u64,
}

/// Named, typed property table with change observers.
#[derive(Clone)]
pub struct PropertyHost {
    inner: Rc<RefCell<HostInner>>,
}

impl PropertyHost {
    /// Create an empty host reporting `type_name` in errors and logs.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HostInner {
                id: HostId::next(),
                type_name: type_name.into(),
                slots: IndexMap::new(),
                observers: Vec::new(),
                next_observer: 0,
            })),
        }
    }

    pub fn id(&self) -> HostId {
        self.inner.borrow().id
    }

    pub fn type_name(&self) -> String {
        self.inner.borrow().type_name.clone()
    }

    /// Declare a property, replacing any previous declaration of the same name.
    pub fn define(&self, name: impl Into<String>, spec: PropertySpec) -> MediatorResult<()> {
        let name = name.into();
        if !spec.accepts(&spec.default) {
            return Err(MediatorError::type_mismatch(
                name,
                spec.kind,
                spec.default.kind_name(),
            ));
        }
        self.insert(name, spec);
        Ok(())
    }

    pub(crate) fn insert(&self, name: impl Into<String>, spec: PropertySpec) {
        let value = spec.default.clone();
        self.inner
            .borrow_mut()
            .slots
            .insert(name.into(), Slot { spec, value });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.borrow().slots.contains_key(name)
    }

    /// Property names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.inner.borrow().slots.keys().cloned().collect()
    }

    /// The subset of `names` that this host does not declare.
    pub fn missing<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let inner = self.inner.borrow();
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|n| !inner.slots.contains_key(*n))
            .map(str::to_owned)
            .collect()
    }

    /// Read a property.
    pub fn get(&self, name: &str) -> MediatorResult<Value> {
        let inner = self.inner.borrow();
        match inner.slots.get(name) {
            Some(slot) => Ok(slot.value.clone()),
            None => Err(MediatorError::configuration(
                inner.type_name.clone(),
                [name],
            )),
        }
    }

    /// Write a property and notify its observers. Returns whether the value changed.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> MediatorResult<bool> {
        match self.replace(name, value.into())? {
            Some(change) => {
                self.emit(&change)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Store a value without notifying, returning the change if the value differed.
    pub(crate) fn replace(&self, name: &str, value: Value) -> MediatorResult<Option<ChangeRecord>> {
        let owner = self.downgrade();
        let mut inner = self.inner.borrow_mut();
        let type_name = inner.type_name.clone();
        let Some(slot) = inner.slots.get_mut(name) else {
            return Err(MediatorError::configuration(type_name, [name]));
        };
        if !slot.spec.accepts(&value) {
            return Err(MediatorError::type_mismatch(
                name,
                slot.spec.kind,
                value.kind_name(),
            ));
        }
        if slot.value == value {
            return Ok(None);
        }
        let old = std::mem::replace(&mut slot.value, value.clone());
        Ok(Some(ChangeRecord::new(name, old, value, owner)))
    }

    /// Run every observer registered for `change.name`, in registration order.
    pub(crate) fn emit(&self, change: &ChangeRecord) -> MediatorResult<()> {
        let observers: Vec<Observer> = {
            let inner = self.inner.borrow();
            inner
                .observers
                .iter()
                .filter(|r| r.names.iter().any(|n| *n == change.name))
                .map(|r| Rc::clone(&r.observer))
                .collect()
        };
        crate::mediator_trace!(
            property = %change.name,
            observers = observers.len(),
            "property changed"
        );
        for observer in observers {
            observer(change)?;
        }
        Ok(())
    }

    /// Register `observer` for the given property names.
    ///
    /// Fails with [`MediatorError::Configuration`] listing every name the host lacks.
    pub fn observe<S, F>(&self, names: &[S], observer: F) -> MediatorResult<ObserverId>
    where
        S: AsRef<str>,
        F: Fn(&ChangeRecord) -> MediatorResult<()> + 'static,
    {
        let missing = self.missing(names);
        if !missing.is_empty() {
            return Err(MediatorError::configuration(self.type_name(), missing));
        }
        let mut inner = self.inner.borrow_mut();
        let id = ObserverId(inner.next_observer);
        inner.next_observer += 1;
        inner.observers.push(Registration {
            id,
            names: names.iter().map(|n| n.as_ref().to_owned()).collect(),
            observer: Rc::new(observer),
        });
        Ok(id)
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.observers.len();
        inner.observers.retain(|r| r.id != id);
        inner.observers.len() != before
    }

    /// Non-owning reference to this host.
    pub fn downgrade(&self) -> OwnerRef {
        OwnerRef {
            id: self.id(),
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl fmt::Debug for PropertyHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("PropertyHost")
            .field("id", &inner.id)
            .field("type_name", &inner.type_name)
            .field("properties", &inner.slots.len())
            .finish()
    }
}

/// Weak back-reference from a [`ChangeRecord`] to the host that produced it.
#[derive(Clone)]
pub struct OwnerRef {
    id: HostId,
    inner: Weak<RefCell<HostInner>>,
}

impl OwnerRef {
    pub fn id(&self) -> HostId {
        self.id
    }

    /// The host, if it is still alive.
    pub fn upgrade(&self) -> Option<PropertyHost> {
        self.inner.upgrade().map(|inner| PropertyHost { inner })
    }
}

impl fmt::Debug for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnerRef").field(&self.id).finish()
    }
}

impl PartialEq for OwnerRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
