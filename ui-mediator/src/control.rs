//! Headless control model
//!
//! A [`Control`] is the minimum a mediator needs from a widget toolkit: named
//! properties, change observation, programmatic writes and (for buttons) an
//! activation event. Each [`ControlKind`] declares a closed set of properties;
//! nothing else can be read, written or observed.
//!
//! List-like kinds (toggle-button groups, dropdowns and selects) keep
//! `options`, `index`, `value` and `label` consistent with each other:
//!
//! ```
//! use ui_mediator::{Control, Value};
//!
//! let dropdown = Control::dropdown();
//! dropdown.set("options", Value::options(["a", "b"])).unwrap();
//! assert_eq!(dropdown.get("value").unwrap(), Value::from("a"));
//!
//! dropdown.set("index", 1usize).unwrap();
//! assert_eq!(dropdown.get("label").unwrap(), Value::from("b"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{MediatorError, MediatorResult};
use crate::host::{ObserverId, PropertyHost, PropertySpec};
use crate::value::{ChangeRecord, OptionPair, Value, ValueKind};

/// Kinds of control the headless model knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Push button; stateless until a component gives it a `value`
    Button,
    /// Button with an on/off `value`
    ToggleButton,
    /// Group of mutually exclusive toggle buttons
    ToggleButtons,
    /// Drop-down list
    Dropdown,
    /// Always-open list box
    Select,
    /// Single-line text field
    Text,
    /// Read-only text
    Label,
}

impl ControlKind {
    /// Type name used in errors and default component names.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Button => "Button",
            Self::ToggleButton => "ToggleButton",
            Self::ToggleButtons => "ToggleButtons",
            Self::Dropdown => "Dropdown",
            Self::Select => "Select",
            Self::Text => "Text",
            Self::Label => "Label",
        }
    }

    /// Whether the kind keeps `options`/`index`/`value`/`label` in sync.
    pub fn is_selection(self) -> bool {
        matches!(self, Self::ToggleButtons | Self::Dropdown | Self::Select)
    }

    fn properties(self) -> Vec<(&'static str, PropertySpec)> {
        let mut props = vec![
            ("description", PropertySpec::new(ValueKind::Str, "")),
            ("disabled", PropertySpec::new(ValueKind::Bool, false)),
            ("visible", PropertySpec::new(ValueKind::Bool, true)),
        ];
        match self {
            Self::Button => props.push(("icon", PropertySpec::new(ValueKind::Str, ""))),
            Self::ToggleButton => {
                props.push(("icon", PropertySpec::new(ValueKind::Str, "")));
                props.push(("value", PropertySpec::new(ValueKind::Bool, false)));
            }
            Self::ToggleButtons | Self::Dropdown | Self::Select => {
                props.push((
                    "options",
                    PropertySpec::new(ValueKind::Options, Value::Options(Vec::new())),
                ));
                props.push(("index", PropertySpec::nullable(ValueKind::Int)));
                props.push(("value", PropertySpec::nullable(ValueKind::Str)));
                props.push(("label", PropertySpec::nullable(ValueKind::Str)));
                if self == Self::Select {
                    props.push(("rows", PropertySpec::new(ValueKind::Int, 5i64)));
                }
            }
            Self::Text => {
                props.push(("value", PropertySpec::new(ValueKind::Str, "")));
                props.push(("placeholder", PropertySpec::new(ValueKind::Str, "")));
            }
            Self::Label => props.push(("value", PropertySpec::new(ValueKind::Str, ""))),
        }
        props
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

type ActivationHandler = Rc<dyn Fn(&Control) -> MediatorResult<()>>;

/// Handle to one headless control. Clones share the same state.
#[derive(Clone)]
pub struct Control {
    kind: ControlKind,
    host: PropertyHost,
    activation: Rc<RefCell<Vec<ActivationHandler>>>,
}

impl Control {
    /// Create a control with the default values of its kind.
    pub fn new(kind: ControlKind) -> Self {
        let host = PropertyHost::new(kind.type_name());
        for (name, spec) in kind.properties() {
            host.insert(name, spec);
        }
        Self {
            kind,
            host,
            activation: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn button() -> Self {
        Self::new(ControlKind::Button)
    }

    pub fn toggle_button() -> Self {
        Self::new(ControlKind::ToggleButton)
    }

    pub fn toggle_buttons() -> Self {
        Self::new(ControlKind::ToggleButtons)
    }

    pub fn dropdown() -> Self {
        Self::new(ControlKind::Dropdown)
    }

    pub fn select() -> Self {
        Self::new(ControlKind::Select)
    }

    pub fn text() -> Self {
        Self::new(ControlKind::Text)
    }

    pub fn label() -> Self {
        Self::new(ControlKind::Label)
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// The property table backing this control.
    pub fn host(&self) -> &PropertyHost {
        &self.host
    }

    pub fn contains(&self, name: &str) -> bool {
        self.host.contains(name)
    }

    pub fn get(&self, name: &str) -> MediatorResult<Value> {
        self.host.get(name)
    }

    /// Write a property, notifying observers of every property that changed as a result.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> MediatorResult<bool> {
        let value = value.into();
        if self.kind.is_selection() && matches!(name, "options" | "index" | "value" | "label") {
            return self.set_selection(name, value);
        }
        self.host.set(name, value)
    }

    /// Declare an extra property on this control.
    pub fn add_property(&self, name: impl Into<String>, spec: PropertySpec) -> MediatorResult<()> {
        self.host.define(name, spec)
    }

    /// Register `observer` for changes of the given properties.
    pub fn observe<S, F>(&self, names: &[S], observer: F) -> MediatorResult<ObserverId>
    where
        S: AsRef<str>,
        F: Fn(&ChangeRecord) -> MediatorResult<()> + 'static,
    {
        self.host.observe(names, observer)
    }

    /// Register a handler for the activation event.
    pub fn on_click<F>(&self, handler: F)
    where
        F: Fn(&Control) -> MediatorResult<()> + 'static,
    {
        self.activation.borrow_mut().push(Rc::new(handler));
    }

    /// Activate the control the way a user would.
    ///
    /// Disabled controls ignore activation and return `Ok(false)`. A toggle
    /// button flips its `value`; activation handlers then run in registration
    /// order.
    pub fn click(&self) -> MediatorResult<bool> {
        if self.get("disabled")?.as_bool().unwrap_or(false) {
            crate::mediator_trace!(control = self.type_name(), "click ignored, control disabled");
            return Ok(false);
        }
        if self.kind == ControlKind::ToggleButton {
            let on = self.get("value")?.as_bool().unwrap_or(false);
            self.set("value", !on)?;
        }
        let handlers: Vec<ActivationHandler> = self.activation.borrow().iter().cloned().collect();
        for handler in handlers {
            handler(self)?;
        }
        Ok(true)
    }

    /// Current options of a selection control.
    pub fn options(&self) -> MediatorResult<Vec<OptionPair>> {
        let value = self.get("options")?;
        match value {
            Value::Options(options) => Ok(options),
            other => Err(MediatorError::type_mismatch(
                "options",
                ValueKind::Options,
                other.kind_name(),
            )),
        }
    }

    fn set_selection(&self, name: &str, value: Value) -> MediatorResult<bool> {
        let mut changes = Vec::new();
        let (options, index) = match name {
            "options" => {
                let options = match value {
                    Value::Options(options) => options,
                    Value::None => Vec::new(),
                    other => {
                        return Err(MediatorError::type_mismatch(
                            name,
                            ValueKind::Options,
                            other.kind_name(),
                        ));
                    }
                };
                changes.push(
                    self.host
                        .replace("options", Value::Options(options.clone()))?,
                );
                let index = if options.is_empty() { None } else { Some(0) };
                (options, index)
            }
            "index" => {
                let options = self.options()?;
                let index = match value {
                    Value::None => None,
                    Value::Int(i) if i >= 0 && (i as usize) < options.len() => Some(i as usize),
                    Value::Int(i) => {
                        return Err(MediatorError::InvalidIndex {
                            index: i,
                            len: options.len(),
                        });
                    }
                    other => {
                        return Err(MediatorError::type_mismatch(
                            name,
                            ValueKind::Int,
                            other.kind_name(),
                        ));
                    }
                };
                (options, index)
            }
            _ => {
                let options = self.options()?;
                let index = match value {
                    Value::None => None,
                    Value::Str(s) => {
                        let found = options.iter().position(|(label, value)| {
                            if name == "label" { *label == s } else { *value == s }
                        });
                        match found {
                            Some(i) => Some(i),
                            None => return Err(MediatorError::invalid_option(name, s)),
                        }
                    }
                    other => {
                        return Err(MediatorError::type_mismatch(
                            name,
                            ValueKind::Str,
                            other.kind_name(),
                        ));
                    }
                };
                (options, index)
            }
        };

        let selected = index.and_then(|i| options.get(i));
        changes.push(
            self.host
                .replace("value", Value::from(selected.map(|(_, v)| v.clone())))?,
        );
        changes.push(
            self.host
                .replace("label", Value::from(selected.map(|(l, _)| l.clone())))?,
        );
        changes.push(self.host.replace("index", Value::from(index))?);

        let mut changed = false;
        for change in changes.into_iter().flatten() {
            changed = true;
            self.host.emit(&change)?;
        }
        Ok(changed)
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("kind", &self.kind)
            .field("host", &self.host.id())
            .finish()
    }
}
