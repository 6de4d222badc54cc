//! Page flow: option selection, frame pages, export.

use std::rc::Rc;

use cursive::Cursive;
use cursive::traits::*;
use cursive::view::IntoBoxedView;
use cursive::views::{Button, Dialog, DummyView, LinearLayout, TextView};
use log::debug;

use crate::data::AppData;
use crate::data::app_data::Advance;
use crate::data::tree::LiveNode;
use crate::report;
use crate::ui::{self, form, show_error};

/// Replaces whatever is on screen with the given layer.
fn replace_layers<V: IntoBoxedView>(siv: &mut Cursive, view: V) {
    while siv.pop_layer().is_some() {}
    siv.add_layer(view);
}

/// Shows the option-selection page, one button per option in declared
/// order.
pub fn show_option_select(siv: &mut Cursive) {
    let names: Vec<String> = siv
        .user_data::<AppData>()
        .map(|app| app.schema.option_names().map(str::to_string).collect())
        .unwrap_or_default();

    let mut buttons = LinearLayout::vertical();
    for name in names {
        buttons.add_child(Button::new(name.clone(), move |s| start_option(s, &name)));
    }

    let content = LinearLayout::vertical()
        .child(TextView::new("Bitte wählen Sie eine Option:"))
        .child(DummyView)
        .child(buttons);

    replace_layers(
        siv,
        Dialog::around(content)
            .title("Datenerfassung")
            .button("Beenden", ui::handle_quit),
    );
}

fn start_option(siv: &mut Cursive, name: &str) {
    let Some(app) = siv.user_data::<AppData>() else {
        return;
    };
    match app.select_option(name) {
        Ok(()) => show_frame(siv),
        Err(e) => show_error(siv, &format!("Konfigurationsfehler: {e}")),
    }
}

/// Builds and displays the current frame page.
pub fn show_frame(siv: &mut Cursive) {
    // The retired page's widgets and visibility links must be gone before
    // the next page's tree is built.
    while siv.pop_layer().is_some() {}

    let Some(app) = siv.user_data::<AppData>() else {
        return;
    };
    let Some(frame) = app.current_frame().cloned() else {
        return;
    };
    let nav_label = app.nav_label();
    let can_go_back = app.can_go_back();
    let is_last = app.is_last_frame();

    let node = Rc::new(LiveNode::build(&frame));
    app.set_live(node.clone());
    debug!("showing frame {:?} ({nav_label})", frame.name);

    let content = LinearLayout::vertical()
        .child(TextView::new(nav_label))
        .child(DummyView)
        .child(form::frame_view(&frame, &node, &frame.name).scrollable());

    let mut dialog = Dialog::around(content).title(frame.name.clone());
    if can_go_back {
        dialog.add_button("← Zurück", on_back);
    }
    dialog.add_button(if is_last { "Fertig" } else { "Weiter →" }, on_next);

    siv.add_layer(dialog);
}

/// Discards the current page without collecting and steps back one frame.
fn on_back(siv: &mut Cursive) {
    let went_back = siv
        .user_data::<AppData>()
        .is_some_and(|app| app.go_back());
    if went_back {
        show_frame(siv);
    }
}

/// Collects the current page into the record, then advances or exports.
fn on_next(siv: &mut Cursive) {
    let Some(app) = siv.user_data::<AppData>() else {
        return;
    };
    let Some(node) = app.live().cloned() else {
        return;
    };
    app.save_current(node.collect());
    match app.advance() {
        Advance::NextFrame => show_frame(siv),
        Advance::Finished => finish(siv),
    }
}

/// Exports the record; on success returns to option selection, on failure
/// leaves the current page untouched so the user may retry.
fn finish(siv: &mut Cursive) {
    let Some(app) = siv.user_data::<AppData>() else {
        return;
    };
    match report::export(&app.record, &app.output_dir) {
        Ok(path) => {
            app.reset();
            let message = format!("Die Daten wurden gespeichert:\n{}", path.display());
            show_option_select(siv);
            siv.add_layer(Dialog::text(message).title("Export").dismiss_button("OK"));
        }
        Err(e) => show_error(siv, &format!("Export fehlgeschlagen: {e}")),
    }
}
