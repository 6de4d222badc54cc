//! Application runner and main entry point.

use std::path::{Path, PathBuf};

use anyhow::Context;
pub use cursive;
use cursive::{Cursive, CursiveExt, event::Key};

use crate::data::AppData;
use crate::data::schema::FormSchema;
use crate::ui;

/// Runs the wizard for the given form definition.
///
/// The definition is loaded once at startup; a load or parse failure aborts
/// before any page is shown. Exported documents are written into
/// `output_dir`.
///
/// # Errors
///
/// Returns errors when the form definition cannot be loaded.
pub fn run(config_path: impl AsRef<Path>, output_dir: impl Into<PathBuf>) -> anyhow::Result<()> {
    let config_path = config_path.as_ref();
    let schema = FormSchema::load(config_path)
        .with_context(|| format!("Konfigurationsfehler in {}", config_path.display()))?;

    let mut siv = Cursive::default();
    siv.set_user_data(AppData::new(schema, output_dir.into()));

    siv.add_global_callback('q', ui::handle_quit);
    siv.add_global_callback('Q', ui::handle_quit);
    siv.add_global_callback(Key::Esc, ui::handle_quit);

    ui::wizard::show_option_select(&mut siv);
    siv.run();
    Ok(())
}
