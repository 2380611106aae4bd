//! Mediator contracts
//!
//! [`Mediator`] is the single entry point components report into. Leaving out
//! `notify` is a compile error, so an incomplete mediator can never be handed
//! to a component:
//!
//! ```compile_fail
//! use ui_mediator::Mediator;
//!
//! struct Silent;
//!
//! impl Mediator for Silent {}
//! ```
//!
//! [`DialogMediator`] adds the observable open/selection state every dialog
//! exposes to its host application.

use std::path::PathBuf;

use crate::error::MediatorResult;
use crate::host::{ObserverId, PropertyHost, PropertySpec};
use crate::component::Reference;
use crate::value::{ChangeRecord, Value, ValueKind};

/// Coordinator that components forward their property changes to.
pub trait Mediator {
    /// React to `change` reported by the component known as `reference`.
    fn notify(&self, reference: &Reference, change: &ChangeRecord) -> MediatorResult<()>;
}

/// A mediator presenting a dialog: open until closed, optionally holding a selected path.
pub trait DialogMediator: Mediator {
    fn dialog_state(&self) -> &DialogState;

    fn is_open(&self) -> bool {
        self.dialog_state().is_open()
    }

    fn selection(&self) -> Option<PathBuf> {
        self.dialog_state().selection()
    }
}

/// Observable `dialog_open` / `dialog_selection` pair.
#[derive(Clone, Debug)]
pub struct DialogState {
    host: PropertyHost,
}

impl DialogState {
    pub const OPEN: &'static str = "dialog_open";
    pub const SELECTION: &'static str = "dialog_selection";

    pub fn new() -> Self {
        let host = PropertyHost::new("DialogState");
        host.insert(Self::OPEN, PropertySpec::new(ValueKind::Bool, true));
        host.insert(Self::SELECTION, PropertySpec::nullable(ValueKind::Path));
        Self { host }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.host.get(Self::OPEN), Ok(Value::Bool(true)))
    }

    pub fn selection(&self) -> Option<PathBuf> {
        match self.host.get(Self::SELECTION) {
            Ok(Value::Path(path)) => Some(path),
            _ => None,
        }
    }

    pub fn set_open(&self, open: bool) -> MediatorResult<bool> {
        self.host.set(Self::OPEN, open)
    }

    pub fn set_selection(&self, selection: Option<PathBuf>) -> MediatorResult<bool> {
        self.host.set(Self::SELECTION, selection)
    }

    /// Subscribe to `dialog_open` and/or `dialog_selection`.
    pub fn observe<S, F>(&self, names: &[S], observer: F) -> MediatorResult<ObserverId>
    where
        S: AsRef<str>,
        F: Fn(&ChangeRecord) -> MediatorResult<()> + 'static,
    {
        self.host.observe(names, observer)
    }

    pub fn host(&self) -> &PropertyHost {
        &self.host
    }
}

impl Default for DialogState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        state: DialogState,
    }

    impl Mediator for Probe {
        fn notify(&self, _: &Reference, _: &ChangeRecord) -> MediatorResult<()> {
            self.state.set_open(false)?;
            Ok(())
        }
    }

    impl DialogMediator for Probe {
        fn dialog_state(&self) -> &DialogState {
            &self.state
        }
    }

    #[test]
    fn dialog_starts_open_without_selection() {
        let probe = Probe {
            state: DialogState::new(),
        };
        assert!(probe.is_open());
        assert_eq!(probe.selection(), None);
    }

    #[test]
    fn selection_changes_are_observable() {
        let state = DialogState::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state
            .observe(&[DialogState::SELECTION], move |change| {
                sink.borrow_mut().push(change.new.clone());
                Ok(())
            })
            .unwrap();

        state.set_selection(Some(PathBuf::from("/tmp/a.txt"))).unwrap();
        state.set_selection(None).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![Value::Path(PathBuf::from("/tmp/a.txt")), Value::None]
        );
    }
}
