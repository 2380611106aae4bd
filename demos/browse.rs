//! Drive a file dialog from the command line.
//!
//! Usage: `browse [ROOT] [PATTERN]`
//!
//! Lists the directories the dialog discovers under ROOT, picks the first one
//! holding a file that matches PATTERN (default `*`), selects that file and
//! saves it, the same way a user clicking through the dialog would.

use ui_mediator::{DialogMediator, Value, logging};
use ui_mediator_dialogs::FileDialog;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();

    let mut args = std::env::args().skip(1);
    let root = args.next().unwrap_or_else(|| ".".to_owned());
    let pattern = args.next().unwrap_or_else(|| "*".to_owned());

    let dialog = FileDialog::builder()
        .root(&root)
        .filter(("Matches", pattern.as_str()))
        .build()?;
    println!("Browsing {} for `{pattern}`", dialog.root().display());

    let directories = dialog.directory().control().options()?;
    for (_, directory) in &directories {
        println!("  {directory}");
    }

    for (_, directory) in directories {
        dialog.directory().set("value", directory.as_str())?;
        if dialog.directory_files().get("value")?.is_none() {
            continue;
        }
        dialog.button_select().control().click()?;
        if let Value::Str(file) = dialog.file_output().get("value")? {
            println!("Selected {file} in {directory}");
        }
        dialog.button_save().control().click()?;
        break;
    }

    match dialog.selection() {
        Some(path) => println!("Saved selection: {}", path.display()),
        None => println!("Nothing matched `{pattern}`"),
    }

    dialog.button_close().control().click()?;
    println!("Dialog open: {}", dialog.is_open());
    Ok(())
}
