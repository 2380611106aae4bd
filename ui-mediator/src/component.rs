//! Components: controls wired to a mediator
//!
//! A [`Component`] wraps exactly one [`Control`], subscribes once to the
//! properties it was told to observe and forwards every change to its
//! mediator as `notify(reference, change)`. The mediator is held weakly;
//! the dialog that owns the component outlives it.
//!
//! Components are built detached and bound afterwards, which lets a mediator
//! create its parts before it is itself behind an `Rc`:
//!
//! ```
//! use std::rc::Rc;
//! use ui_mediator::{ChangeRecord, Component, Control, Mediator, MediatorResult, Reference};
//!
//! struct Echo;
//!
//! impl Mediator for Echo {
//!     fn notify(&self, reference: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
//!         println!("{reference}: {} -> {}", change.old, change.new);
//!         Ok(())
//!     }
//! }
//!
//! let text = Component::builder(Control::text()).name("query").build().unwrap();
//! let echo: Rc<dyn Mediator> = Rc::new(Echo);
//! text.attach(&Rc::downgrade(&echo));
//! text.set("value", "hello").unwrap();
//! ```

use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::control::{Control, ControlKind};
use crate::error::{MediatorError, MediatorResult};
use crate::host::PropertySpec;
use crate::mediator::Mediator;
use crate::value::{ChangeRecord, Value, ValueKind};

/// Identity of a component, unique for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

/// Key a component reports itself under, and that dispatch tables are keyed by.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reference {
    /// The component's display name
    Name(String),
    /// The component itself
    Component(ComponentId),
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Component(id) => id.fmt(f),
        }
    }
}

impl From<&str> for Reference {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Reference {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<ComponentId> for Reference {
    fn from(id: ComponentId) -> Self {
        Self::Component(id)
    }
}

/// How a component identifies itself to its mediator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferenceMode {
    /// Report under the display name
    #[default]
    Name,
    /// Report under the component identity
    Identity,
}

type MediatorSlot = Rc<OnceCell<Weak<dyn Mediator>>>;

/// The forwarding path shared by the control subscription and [`Component::forward`].
#[derive(Clone)]
struct Forwarder {
    name: String,
    reference: Reference,
    mediator: MediatorSlot,
}

impl Forwarder {
    fn forward(&self, change: &ChangeRecord) -> MediatorResult<()> {
        let Some(mediator) = self.mediator.get().and_then(Weak::upgrade) else {
            crate::mediator_trace!(
                component = %self.name,
                property = %change.name,
                "no mediator bound, change dropped"
            );
            return Ok(());
        };
        crate::mediator_trace!(
            reference = %self.reference,
            property = %change.name,
            "forwarding change"
        );
        mediator.notify(&self.reference, change)
    }
}

/// Builder for [`Component`].
#[must_use]
pub struct ComponentBuilder {
    control: Control,
    name: Option<String>,
    observe: Vec<String>,
    reference_mode: ReferenceMode,
    mediator: Option<Weak<dyn Mediator>>,
}

impl ComponentBuilder {
    /// Display name; defaults to `<ControlType>Component`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Property names to observe; defaults to `["value"]`.
    pub fn observe<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.observe = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn reference_mode(mut self, mode: ReferenceMode) -> Self {
        self.reference_mode = mode;
        self
    }

    /// Bind the mediator at build time instead of via [`Component::attach`].
    pub fn mediator(mut self, mediator: &Weak<dyn Mediator>) -> Self {
        self.mediator = Some(mediator.clone());
        self
    }

    /// Validate the observed names and subscribe to the control.
    pub fn build(self) -> MediatorResult<Component> {
        let Self {
            control,
            name,
            observe,
            reference_mode,
            mediator,
        } = self;

        if control.kind() == ControlKind::Button && !control.contains("value") {
            synthesize_button_value(&control)?;
        }

        if observe.is_empty() {
            return Err(MediatorError::empty_observation(control.type_name()));
        }
        let missing = control.host().missing(&observe);
        if !missing.is_empty() {
            return Err(MediatorError::configuration(control.type_name(), missing));
        }

        let id = ComponentId::next();
        let name = name.unwrap_or_else(|| format!("{}Component", control.type_name()));
        let reference = match reference_mode {
            ReferenceMode::Name => Reference::Name(name.clone()),
            ReferenceMode::Identity => Reference::Component(id),
        };
        let forwarder = Forwarder {
            name: name.clone(),
            reference: reference.clone(),
            mediator: Rc::new(OnceCell::new()),
        };

        let subscription = forwarder.clone();
        control.observe(&observe, move |change| subscription.forward(change))?;

        let component = Component {
            id,
            name,
            reference,
            observed: observe,
            control,
            forwarder,
        };
        if let Some(mediator) = mediator {
            component.attach(&mediator);
        }
        Ok(component)
    }
}

/// Buttons carry no state of their own; give them a flag that flips on every click.
fn synthesize_button_value(control: &Control) -> MediatorResult<()> {
    control.add_property("value", PropertySpec::new(ValueKind::Bool, false))?;
    control.on_click(|button| {
        let on = button.get("value")?.as_bool().unwrap_or(false);
        button.set("value", !on)?;
        Ok(())
    });
    Ok(())
}

/// One control plus the subscription forwarding its changes to a mediator.
#[derive(Clone)]
pub struct Component {
    id: ComponentId,
    name: String,
    reference: Reference,
    observed: Vec<String>,
    control: Control,
    forwarder: Forwarder,
}

impl Component {
    pub fn builder(control: Control) -> ComponentBuilder {
        ComponentBuilder {
            control,
            name: None,
            observe: vec!["value".to_owned()],
            reference_mode: ReferenceMode::default(),
            mediator: None,
        }
    }

    /// Component with every default: generated name, observing `value`.
    pub fn new(control: Control) -> MediatorResult<Self> {
        Self::builder(control).build()
    }

    /// Bind the mediator. Only the first call has an effect; returns whether it did.
    pub fn attach(&self, mediator: &Weak<dyn Mediator>) -> bool {
        let bound = self.forwarder.mediator.set(mediator.clone()).is_ok();
        if bound {
            crate::logging::log_component_attached(&self.name);
        } else {
            crate::mediator_warn!(component = %self.name, "mediator already bound");
        }
        bound
    }

    /// The bound mediator, if any and still alive.
    pub fn mediator(&self) -> Option<Rc<dyn Mediator>> {
        self.forwarder.mediator.get().and_then(Weak::upgrade)
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn contains(&self, name: &str) -> bool {
        self.control.contains(name)
    }

    pub fn get(&self, name: &str) -> MediatorResult<Value> {
        self.control.get(name)
    }

    /// Write a control property; observers (including this component's own) fire synchronously.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> MediatorResult<bool> {
        self.control.set(name, value)
    }

    /// Read several properties at once, in the order asked.
    pub fn values<S: AsRef<str>>(&self, names: &[S]) -> MediatorResult<IndexMap<String, Value>> {
        let missing = self.control.host().missing(names);
        if !missing.is_empty() {
            return Err(MediatorError::configuration(
                self.control.type_name(),
                missing,
            ));
        }
        names
            .iter()
            .map(|n| Ok((n.as_ref().to_owned(), self.control.get(n.as_ref())?)))
            .collect()
    }

    /// Push a change through the forwarding path by hand.
    pub fn forward(&self, change: &ChangeRecord) -> MediatorResult<()> {
        self.forwarder.forward(change)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("reference", &self.reference)
            .field("observed", &self.observed)
            .field("control", &self.control)
            .finish()
    }
}
