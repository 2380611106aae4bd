use std::cell::RefCell;
use std::rc::{Rc, Weak};

use pretty_assertions::assert_eq;
use static_assertions::{assert_impl_all, assert_not_impl_any};
use ui_mediator::{
    ChangeKind, ChangeRecord, Component, Control, DialogMediator, DialogState, Mediator,
    MediatorError, MediatorResult, Reference, ReferenceMode, Value,
};

assert_impl_all!(Recorder: Mediator);
assert_impl_all!(Reference: std::hash::Hash, Eq, Clone, std::fmt::Display);
// Single-threaded by construction
assert_not_impl_any!(Component: Send, Sync);
assert_not_impl_any!(DialogState: Send, Sync);

/// Mediator that records every notification it receives.
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<(Reference, String, Value, Value)>>,
    state: DialogState,
}

impl Mediator for Recorder {
    fn notify(&self, reference: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        self.calls.borrow_mut().push((
            reference.clone(),
            change.name.clone(),
            change.old.clone(),
            change.new.clone(),
        ));
        Ok(())
    }
}

impl DialogMediator for Recorder {
    fn dialog_state(&self) -> &DialogState {
        &self.state
    }
}

fn recorder() -> (Rc<Recorder>, Weak<dyn Mediator>) {
    let recorder = Rc::new(Recorder::default());
    let weak: Weak<dyn Mediator> = Rc::downgrade(&recorder) as Weak<dyn Mediator>;
    (recorder, weak)
}

#[test]
fn unknown_observed_name_is_a_configuration_error() {
    let err = Component::builder(Control::button())
        .observe(["wrong_trait"])
        .build()
        .unwrap_err();
    match err {
        MediatorError::Configuration { control, names } => {
            assert_eq!(control, "Button");
            assert_eq!(names, vec!["wrong_trait".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn mutation_notifies_exactly_once_with_old_and_new() {
    let (recorder, weak) = recorder();
    let text = Component::builder(Control::text())
        .name("path")
        .mediator(&weak)
        .build()
        .unwrap();

    text.set("value", "/tmp").unwrap();

    let calls = recorder.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        (
            Reference::from("path"),
            "value".to_string(),
            Value::from(""),
            Value::from("/tmp"),
        )
    );
}

#[test]
fn identity_reference_reports_the_component() {
    let (recorder, weak) = recorder();
    let text = Component::builder(Control::text())
        .reference_mode(ReferenceMode::Identity)
        .build()
        .unwrap();
    assert!(text.attach(&weak));
    assert!(!text.attach(&weak));

    text.set("value", "x").unwrap();
    assert_eq!(recorder.calls.borrow()[0].0, Reference::Component(text.id()));
}

#[test]
fn button_gets_a_value_that_flips_on_click() {
    let (recorder, weak) = recorder();
    let button = Component::builder(Control::button())
        .name("go")
        .mediator(&weak)
        .build()
        .unwrap();
    assert!(button.contains("value"));
    assert_eq!(button.get("value").unwrap(), Value::Bool(false));

    button.control().click().unwrap();
    button.control().click().unwrap();

    let news: Vec<Value> = recorder
        .calls
        .borrow()
        .iter()
        .map(|(_, _, _, new)| new.clone())
        .collect();
    assert_eq!(news, vec![Value::Bool(true), Value::Bool(false)]);
}

#[test]
fn several_names_and_sequence_changes() {
    let (recorder, weak) = recorder();
    let select = Component::builder(Control::select())
        .observe(["options", "value"])
        .mediator(&weak)
        .build()
        .unwrap();

    let kinds = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&kinds);
    select
        .control()
        .observe(&["options"], move |change| {
            sink.borrow_mut().push(change.kind);
            Ok(())
        })
        .unwrap();

    select.set("options", Value::options(["a", "b"])).unwrap();
    let names: Vec<String> = recorder
        .calls
        .borrow()
        .iter()
        .map(|(_, name, _, _)| name.clone())
        .collect();
    assert_eq!(names, vec!["options", "value"]);
    assert_eq!(*kinds.borrow(), vec![ChangeKind::Sequence]);
}

#[test]
fn manual_forward_reaches_the_mediator() {
    let (recorder, weak) = recorder();
    let source = Control::text();
    let captured = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&captured);
    source
        .observe(&["value"], move |change| {
            *slot.borrow_mut() = Some(change.clone());
            Ok(())
        })
        .unwrap();
    source.set("value", "typed").unwrap();
    let change = captured.borrow_mut().take().unwrap();

    let relay = Component::builder(Control::label())
        .name("relay")
        .mediator(&weak)
        .build()
        .unwrap();
    relay.forward(&change).unwrap();

    let calls = recorder.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Reference::from("relay"));
    assert_eq!(calls[0].3, Value::from("typed"));
}

#[test]
fn get_and_set_reject_unknown_names() {
    let label = Component::new(Control::label()).unwrap();
    assert!(matches!(
        label.get("options"),
        Err(MediatorError::Configuration { .. })
    ));
    assert!(matches!(
        label.set("options", Value::options(["x"])),
        Err(MediatorError::Configuration { .. })
    ));
}

#[test]
fn dropped_mediator_silences_notifications() {
    let (recorder, weak) = recorder();
    let text = Component::builder(Control::text())
        .mediator(&weak)
        .build()
        .unwrap();
    drop(recorder);
    assert!(text.mediator().is_none());
    assert!(text.set("value", "late").unwrap());
}

#[test]
fn dialog_mediator_exposes_state() {
    let (recorder, _weak) = recorder();
    assert!(recorder.is_open());
    recorder.dialog_state().set_open(false).unwrap();
    assert!(!recorder.is_open());
    assert_eq!(recorder.selection(), None);
}
