//! Cursive views and page sequencing.
//!
//! The wizard is a sequence of fullscreen dialog layers driven by the state
//! in [`AppData`](crate::data::AppData), which is stored as cursive user
//! data and mutated only from UI callbacks.

/// Widget construction for one frame.
pub mod form;

/// Page flow: option selection, frame pages, export.
pub mod wizard;

use cursive::Cursive;
use cursive::views::Dialog;

/// Asks for confirmation, then terminates the event loop.
pub fn handle_quit(siv: &mut Cursive) {
    siv.add_layer(
        Dialog::text("Möchten Sie das Programm wirklich beenden?")
            .title("Beenden")
            .button("Ja", |s| s.quit())
            .dismiss_button("Nein"),
    );
}

/// Shows a blocking error dialog on top of the current page.
pub fn show_error(siv: &mut Cursive, message: &str) {
    siv.add_layer(Dialog::text(message).title("Fehler").dismiss_button("OK"));
}
