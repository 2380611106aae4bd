use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use ui_mediator::{DialogMediator, DialogState, Value};
use ui_mediator_dialogs::{FileDialog, FileDialogConfig, FileFilter, PLACEHOLDER, PathCodec};

/// Root one level below the temp dir, so the seeded parent listing stays small.
fn workspace() -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("workspace");
    std::fs::create_dir_all(root.join("docs")).unwrap();
    std::fs::write(root.join("docs/a.txt"), "hello").unwrap();
    std::fs::write(root.join("docs/b.md"), "").unwrap();
    (tmp, root)
}

fn text_dialog(root: &Path) -> Rc<FileDialog> {
    FileDialog::builder()
        .root(root)
        .filters([("All", "*"), ("Text", "*.txt")])
        .build()
        .unwrap()
}

#[test]
fn default_dialog_hides_a_match_all_filter() {
    let dialog = FileDialog::new(None, None).unwrap();

    assert_eq!(dialog.name(), "FileDialog");
    let filter = dialog.file_options();
    assert_eq!(filter.get("visible").unwrap(), Value::Bool(false));
    assert_eq!(filter.get("disabled").unwrap(), Value::Bool(true));
    assert_eq!(
        filter.get("options").unwrap(),
        Value::labelled([("", "*")])
    );
    assert_eq!(
        dialog.button_save().get("disabled").unwrap(),
        Value::Bool(true)
    );
    assert!(dialog.is_open());
    assert_eq!(dialog.selection(), None);
}

#[test]
fn empty_filter_list_counts_as_none() {
    let (_tmp, root) = workspace();
    let dialog = FileDialog::from_config(FileDialogConfig {
        name: Some("Picker".into()),
        root: Some(root),
        filters: Some(Vec::new()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(dialog.name(), "Picker");
    assert_eq!(
        dialog.file_options().get("visible").unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn single_filter_is_locked_and_hidden_when_unlabelled() {
    let (_tmp, root) = workspace();

    let labelled = FileDialog::builder()
        .root(&root)
        .filter(("Text", "*.txt"))
        .build()
        .unwrap();
    assert_eq!(
        labelled.file_options().get("disabled").unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        labelled.file_options().get("visible").unwrap(),
        Value::Bool(true)
    );

    let unlabelled = FileDialog::builder()
        .root(&root)
        .filter(FileFilter::new("", "*.md"))
        .build()
        .unwrap();
    assert_eq!(
        unlabelled.file_options().get("visible").unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn save_flow_emits_the_joined_selection() {
    let (_tmp, root) = workspace();
    let dialog = text_dialog(&root);

    let saved = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&saved);
    dialog
        .dialog_state()
        .observe(&[DialogState::SELECTION], move |change| {
            sink.borrow_mut().push(change.new.clone());
            Ok(())
        })
        .unwrap();

    dialog.file_options().set("value", "*.txt").unwrap();
    let docs = PathCodec::encode_dir(&root.join("docs/a.txt"));
    dialog.directory().set("value", docs).unwrap();
    assert_eq!(
        dialog.directory_files().get("value").unwrap(),
        Value::from("\u{1F4C4} a.txt")
    );
    assert_eq!(
        dialog.button_select().get("disabled").unwrap(),
        Value::Bool(false)
    );

    assert!(dialog.button_select().control().click().unwrap());
    assert_eq!(
        dialog.button_select().get("icon").unwrap(),
        Value::from("minus")
    );
    assert_eq!(
        dialog.file_output().get("value").unwrap(),
        Value::from("a.txt")
    );
    assert_eq!(
        dialog.button_save().get("disabled").unwrap(),
        Value::Bool(false)
    );

    assert!(dialog.button_save().control().click().unwrap());
    let expected = root.join("docs").join("a.txt");
    assert_eq!(dialog.selection(), Some(expected.clone()));
    assert_eq!(
        dialog.button_select().get("value").unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        dialog.file_selected().get("value").unwrap(),
        Value::from(PLACEHOLDER)
    );
    assert_eq!(*saved.borrow(), vec![Value::Path(expected)]);
}

#[test]
fn save_without_a_selected_file_is_ignored() {
    let (_tmp, root) = workspace();
    let dialog = text_dialog(&root);

    dialog.button_save().set("disabled", false).unwrap();
    dialog.button_save().control().click().unwrap();
    assert_eq!(dialog.selection(), None);
}

#[test]
fn disabled_select_toggle_ignores_clicks() {
    let (_tmp, root) = workspace();
    let dialog = text_dialog(&root);
    assert!(!dialog.button_select().control().click().unwrap());
    assert_eq!(
        dialog.button_select().get("value").unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn close_marks_the_dialog_closed() {
    let (_tmp, root) = workspace();
    let dialog = text_dialog(&root);
    dialog.button_close().control().click().unwrap();
    assert!(!dialog.is_open());

    // Closing is terminal but components stay wired
    dialog.file_options().set("value", "*.txt").unwrap();
    assert!(!dialog.is_open());
}

#[test]
fn empty_directory_resets_the_select_toggle() {
    let (_tmp, root) = workspace();
    let dialog = text_dialog(&root);

    let docs = PathCodec::encode_dir(&root.join("docs/a.txt"));
    dialog.directory().set("value", docs).unwrap();
    dialog.button_select().control().click().unwrap();
    assert_eq!(
        dialog.file_selected().get("value").unwrap(),
        Value::from("\u{1F4C4} a.txt")
    );

    // The workspace itself only holds directories
    let workspace = PathCodec::encode_dir(&root.join("docs"));
    dialog.directory().set("value", workspace).unwrap();

    assert!(dialog.directory_files().control().options().unwrap().is_empty());
    assert_eq!(
        dialog.file_selected().get("value").unwrap(),
        Value::from(PLACEHOLDER)
    );
    assert_eq!(
        dialog.button_select().get("disabled").unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        dialog.button_select().get("value").unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn components_report_under_their_names() {
    let (_tmp, root) = workspace();
    let dialog = text_dialog(&root);
    let components = dialog.components();
    let names: Vec<&str> = components.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec![
            "ButtonMin",
            "ButtonClose",
            "ButtonSave",
            "ButtonSelect",
            "LabelComponent",
            "FileOptions",
            "FileOutput",
            "FileSelected",
            "Directory",
            "DirectoryFiles",
        ]
    );
    assert!(components.iter().all(|c| c.mediator().is_some()));
}
