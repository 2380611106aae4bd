//! The file dialog mediator
//!
//! Ten components make up the dialog: a filter group, a directory dropdown,
//! a directory-contents list, a select toggle with a read-only slot for the
//! chosen file, an output field, and save/close/minimise buttons. None of them
//! know about each other. Every change goes through [`FileDialog::notify`],
//! which routes it to one transition handler by component reference.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};
use ui_mediator::{
    ChangeRecord, Component, Control, DialogMediator, DialogState, DispatchRegistry, Mediator,
    MediatorResult, Reference, Value,
};

use crate::codec::PathCodec;
use crate::config::FileDialogConfig;
use crate::enumerate::{list_directories, list_files};
use crate::error::FileDialogResult;
use crate::filter::FileFilter;
use crate::fs::{FileSystem, StdFileSystem};

/// Shown in the selected-file slot and the output field when nothing is chosen.
pub const PLACEHOLDER: &str = "...";

const ICON_SELECT_OFF: &str = "plus";
const ICON_SELECT_ON: &str = "minus";

/// Component names, which double as dispatch references.
pub mod names {
    /// Minimise button
    pub const BUTTON_MIN: &str = "ButtonMin";
    /// Close button
    pub const BUTTON_CLOSE: &str = "ButtonClose";
    /// Save button
    pub const BUTTON_SAVE: &str = "ButtonSave";
    /// Select toggle
    pub const BUTTON_SELECT: &str = "ButtonSelect";
    /// Label in front of the selected-file slot
    pub const LABEL: &str = "LabelComponent";
    /// Filter group
    pub const FILE_OPTIONS: &str = "FileOptions";
    /// Output field
    pub const FILE_OUTPUT: &str = "FileOutput";
    /// Selected-file slot
    pub const FILE_SELECTED: &str = "FileSelected";
    /// Directory dropdown
    pub const DIRECTORY: &str = "Directory";
    /// Directory-contents list
    pub const DIRECTORY_FILES: &str = "DirectoryFiles";
}

struct Parts {
    button_min: Component,
    button_close: Component,
    button_save: Component,
    button_select: Component,
    label_selected: Component,
    file_options: Component,
    file_output: Component,
    file_selected: Component,
    directory: Component,
    directory_files: Component,
}

impl Parts {
    fn new() -> MediatorResult<Self> {
        let named = |control: Control, name: &str| Component::builder(control).name(name).build();
        Ok(Self {
            button_min: named(Control::button(), names::BUTTON_MIN)?,
            button_close: named(Control::button(), names::BUTTON_CLOSE)?,
            button_save: named(Control::button(), names::BUTTON_SAVE)?,
            button_select: named(Control::toggle_button(), names::BUTTON_SELECT)?,
            label_selected: Component::new(Control::label())?,
            file_options: named(Control::toggle_buttons(), names::FILE_OPTIONS)?,
            file_output: named(Control::text(), names::FILE_OUTPUT)?,
            file_selected: named(Control::text(), names::FILE_SELECTED)?,
            directory: named(Control::dropdown(), names::DIRECTORY)?,
            directory_files: named(Control::select(), names::DIRECTORY_FILES)?,
        })
    }

    fn all(&self) -> [&Component; 10] {
        [
            &self.button_min,
            &self.button_close,
            &self.button_save,
            &self.button_select,
            &self.label_selected,
            &self.file_options,
            &self.file_output,
            &self.file_selected,
            &self.directory,
            &self.directory_files,
        ]
    }
}

/// Builder for [`FileDialog`].
///
/// ```no_run
/// use ui_mediator::DialogMediator;
/// use ui_mediator_dialogs::FileDialog;
///
/// let dialog = FileDialog::builder()
///     .root("/srv/data")
///     .filter(("CSV", "*.csv"))
///     .filter(("All", "*"))
///     .build()?;
/// assert!(dialog.is_open());
/// # Ok::<(), ui_mediator_dialogs::FileDialogError>(())
/// ```
#[must_use]
pub struct FileDialogBuilder {
    config: FileDialogConfig,
    fs: Box<dyn FileSystem>,
}

impl FileDialogBuilder {
    /// Dialog name (defaults to `FileDialog`)
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }
    /// Directory to browse from (defaults to the current directory)
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = Some(root.into());
        self
    }
    /// Add a filter
    pub fn filter<F: Into<FileFilter>>(mut self, filter: F) -> Self {
        self.config
            .filters
            .get_or_insert_with(Vec::new)
            .push(filter.into());
        self
    }
    /// Add multiple filters
    pub fn filters<I, F>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FileFilter>,
    {
        self.config
            .filters
            .get_or_insert_with(Vec::new)
            .extend(filters.into_iter().map(Into::into));
        self
    }
    /// Search below the root when listing directories (on by default)
    pub fn recursive(mut self, yes: bool) -> Self {
        self.config.recursive = yes;
        self
    }
    /// Browse a custom filesystem instead of the local disk
    pub fn file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }
    /// Build the dialog and seed its lists
    pub fn build(self) -> FileDialogResult<Rc<FileDialog>> {
        FileDialog::create(self.config, self.fs)
    }
}

/// Directory browser and file picker assembled from ten components.
pub struct FileDialog {
    name: String,
    root: PathBuf,
    recursive: bool,
    fs: Box<dyn FileSystem>,
    state: DialogState,
    registry: DispatchRegistry<FileDialog>,
    parts: Parts,
}

impl FileDialog {
    /// Dialog rooted at the current directory.
    pub fn new(
        name: Option<&str>,
        filters: Option<Vec<FileFilter>>,
    ) -> FileDialogResult<Rc<Self>> {
        Self::from_config(FileDialogConfig {
            name: name.map(str::to_owned),
            filters,
            ..Default::default()
        })
    }

    /// Start configuring a dialog.
    pub fn builder() -> FileDialogBuilder {
        FileDialogBuilder {
            config: FileDialogConfig::default(),
            fs: Box::new(StdFileSystem),
        }
    }

    /// Dialog described by `config`, browsing the local disk.
    pub fn from_config(config: FileDialogConfig) -> FileDialogResult<Rc<Self>> {
        Self::create(config, Box::new(StdFileSystem))
    }

    fn create(config: FileDialogConfig, fs: Box<dyn FileSystem>) -> FileDialogResult<Rc<Self>> {
        let root = match config.root {
            Some(root) => std::path::absolute(root)?,
            None => std::env::current_dir()?,
        };
        let parts = Parts::new()?;
        let registry = Self::registry();
        let dialog = Rc::new(Self {
            name: config.name.unwrap_or_else(|| "FileDialog".to_owned()),
            root,
            recursive: config.recursive,
            fs,
            state: DialogState::new(),
            registry,
            parts,
        });

        let mediator: Weak<dyn Mediator> = Rc::downgrade(&dialog) as Weak<dyn Mediator>;
        for component in dialog.parts.all() {
            component.attach(&mediator);
        }
        ui_mediator::logging::log_registry_ready(&dialog.name, dialog.registry.len());

        dialog.apply_initial_state()?;
        dialog.seed_filters(config.filters)?;
        Ok(dialog)
    }

    fn registry() -> DispatchRegistry<Self> {
        let mut registry = DispatchRegistry::new();
        registry.register(names::FILE_OPTIONS, Self::on_file_options);
        registry.register(names::DIRECTORY, Self::on_directory);
        registry.register(names::DIRECTORY_FILES, Self::on_directory_files);
        registry.register(names::BUTTON_SELECT, Self::on_button_select);
        registry.register(names::BUTTON_SAVE, Self::on_button_save);
        registry.register(names::BUTTON_CLOSE, Self::on_button_close);
        registry.register(names::FILE_SELECTED, Self::on_file_selected);
        registry
    }

    fn apply_initial_state(&self) -> MediatorResult<()> {
        let p = &self.parts;
        p.button_close.set("description", "X")?;
        p.button_save.set("icon", "file")?;
        p.button_save.set("disabled", true)?;
        p.button_select.set("icon", ICON_SELECT_OFF)?;
        p.button_select.set("disabled", true)?;
        p.label_selected.set("value", "Selection:")?;
        p.file_output.set("value", PLACEHOLDER)?;
        p.file_selected.set("value", PLACEHOLDER)?;
        p.file_selected.set("disabled", true)?;
        p.directory_files.set("rows", 4i64)?;
        Ok(())
    }

    fn seed_filters(&self, filters: Option<Vec<FileFilter>>) -> MediatorResult<()> {
        let options = &self.parts.file_options;
        match filters.filter(|f| !f.is_empty()) {
            None => {
                options.set("visible", false)?;
                options.set("disabled", true)?;
                options.set("options", Value::Options(vec![FileFilter::match_all().to_option()]))?;
            }
            Some(filters) => {
                let pairs = filters.iter().map(FileFilter::to_option).collect::<Vec<_>>();
                options.set("options", Value::Options(pairs))?;
                if let [only] = filters.as_slice() {
                    options.set("disabled", true)?;
                    if only.label.is_empty() {
                        options.set("visible", false)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// The pattern of the active filter, if one is selected.
    fn active_pattern(&self) -> MediatorResult<Option<String>> {
        Ok(self
            .parts
            .file_options
            .get("value")?
            .as_str()
            .map(str::to_owned))
    }

    fn on_file_options(&self, _: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        trace_transition(names::FILE_OPTIONS, change);
        let p = &self.parts;
        p.button_select.set("value", false)?;

        let listing = match change.new.as_str() {
            Some(pattern) => list_directories(&*self.fs, &self.root, pattern, self.recursive)?,
            None => Vec::new(),
        };
        let current: Vec<String> = p
            .directory
            .control()
            .options()?
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        if !listing.is_empty() && current == listing {
            p.directory.set("index", 0usize)?;
        } else {
            p.directory.set("options", Value::options(listing))?;
        }
        Ok(())
    }

    fn on_directory(&self, _: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        trace_transition(names::DIRECTORY, change);
        let listing = match (change.new.as_str(), self.active_pattern()?) {
            (Some(dir), Some(pattern)) => {
                list_files(&*self.fs, &PathCodec::decode_path(dir), &pattern, false)?
            }
            _ => Vec::new(),
        };
        self.parts
            .directory_files
            .set("options", Value::options(listing))?;
        Ok(())
    }

    fn on_directory_files(&self, _: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        trace_transition(names::DIRECTORY_FILES, change);
        let select = &self.parts.button_select;
        if change.new.is_none() {
            self.parts.file_selected.set("value", PLACEHOLDER)?;
            select.set("disabled", true)?;
            select.set("value", false)?;
        } else {
            select.set("disabled", false)?;
        }
        Ok(())
    }

    fn on_button_select(&self, _: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        trace_transition(names::BUTTON_SELECT, change);
        let on = change.new.as_bool().unwrap_or(false);
        let p = &self.parts;
        p.button_select
            .set("icon", if on { ICON_SELECT_ON } else { ICON_SELECT_OFF })?;

        let shown = if on {
            p.directory_files
                .get("value")?
                .as_str()
                .unwrap_or(PLACEHOLDER)
                .to_owned()
        } else {
            PLACEHOLDER.to_owned()
        };
        p.file_selected.set("value", shown)?;
        Ok(())
    }

    fn on_button_save(&self, _: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        trace_transition(names::BUTTON_SAVE, change);
        let p = &self.parts;
        let file = PathCodec::decode(p.file_selected.get("value")?.as_str().unwrap_or(PLACEHOLDER));
        if file == PLACEHOLDER {
            #[cfg(feature = "tracing")]
            debug!(dialog = %self.name, "save ignored, no file selected");
            return Ok(());
        }
        let Some(directory) = p.directory.get("value")?.as_str().map(PathCodec::decode_path)
        else {
            #[cfg(feature = "tracing")]
            debug!(dialog = %self.name, "save ignored, no directory selected");
            return Ok(());
        };

        let selection = directory.join(file);
        #[cfg(feature = "tracing")]
        debug!(dialog = %self.name, selection = %selection.display(), "selection saved");
        self.state.set_selection(Some(selection))?;
        p.button_select.set("value", false)?;
        Ok(())
    }

    fn on_button_close(&self, _: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        trace_transition(names::BUTTON_CLOSE, change);
        self.state.set_open(false)?;
        Ok(())
    }

    fn on_file_selected(&self, _: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        trace_transition(names::FILE_SELECTED, change);
        let p = &self.parts;
        let shown = PathCodec::decode(change.new.as_str().unwrap_or(PLACEHOLDER));
        if shown == PLACEHOLDER {
            p.file_output.set("value", PLACEHOLDER)?;
            return Ok(());
        }
        p.file_output.set("value", shown)?;
        p.button_save.set("disabled", false)?;
        Ok(())
    }

    /// Dialog name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute directory the dialog browses from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Minimise button (no transition of its own)
    pub fn button_min(&self) -> &Component {
        &self.parts.button_min
    }

    /// Close button
    pub fn button_close(&self) -> &Component {
        &self.parts.button_close
    }

    /// Save button; enabled once a file has been selected
    pub fn button_save(&self) -> &Component {
        &self.parts.button_save
    }

    /// Select toggle copying the highlighted file into the selected-file slot
    pub fn button_select(&self) -> &Component {
        &self.parts.button_select
    }

    /// `Selection:` label
    pub fn label_selected(&self) -> &Component {
        &self.parts.label_selected
    }

    /// Filter group
    pub fn file_options(&self) -> &Component {
        &self.parts.file_options
    }

    /// Output field
    pub fn file_output(&self) -> &Component {
        &self.parts.file_output
    }

    /// Selected-file slot
    pub fn file_selected(&self) -> &Component {
        &self.parts.file_selected
    }

    /// Directory dropdown
    pub fn directory(&self) -> &Component {
        &self.parts.directory
    }

    /// Contents of the chosen directory
    pub fn directory_files(&self) -> &Component {
        &self.parts.directory_files
    }

    /// Every component, in construction order.
    pub fn components(&self) -> [&Component; 10] {
        self.parts.all()
    }
}

impl Mediator for FileDialog {
    fn notify(&self, reference: &Reference, change: &ChangeRecord) -> MediatorResult<()> {
        self.registry.call(self, reference, change)
    }
}

impl DialogMediator for FileDialog {
    fn dialog_state(&self) -> &DialogState {
        &self.state
    }
}

impl fmt::Debug for FileDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileDialog")
            .field("name", &self.name)
            .field("root", &self.root)
            .field("recursive", &self.recursive)
            .field("open", &self.state.is_open())
            .field("selection", &self.state.selection())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "tracing")]
fn trace_transition(component: &'static str, change: &ChangeRecord) {
    trace!(
        event = "dialog.transition",
        component,
        property = %change.name,
        old = %change.old,
        new = %change.new,
        "file dialog transition"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_transition(_component: &'static str, _change: &ChangeRecord) {}
