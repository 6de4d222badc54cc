//! Widget construction for one frame.
//!
//! Walks a frame definition alongside its live node and builds the widget
//! column, wiring every widget to its value slot: checkbox changes write the
//! bool slot (firing its subscribers) and mirror the sub-frame's visibility,
//! entry edits write the text slot on every keystroke. Slots therefore
//! always hold the latest values when the page is torn down.

use cursive::traits::*;
use cursive::views::{Checkbox, EditView, HideableView, LinearLayout, Panel, TextView};
use log::warn;

use crate::data::schema::{ControlDef, FrameDef};
use crate::data::tree::{LiveNode, SUB_FRAME_KEY_PREFIX};

/// View a sub-frame is wrapped in; looked up by name when its checkbox
/// toggles.
type SubFrameView = HideableView<Panel<LinearLayout>>;

/// Builds the widget column for one frame.
///
/// `path` namespaces the view names of nested sub-frames so they stay
/// unique at any depth.
pub fn frame_view(frame: &FrameDef, node: &LiveNode, path: &str) -> LinearLayout {
    let mut column = LinearLayout::vertical();
    if let Some(description) = &frame.description {
        column.add_child(TextView::new(description.clone()));
    }

    for control in &frame.controls {
        match control {
            ControlDef::Checkbox { text, sub_frame } => {
                add_checkbox(&mut column, node, path, text, sub_frame.as_ref());
            }
            ControlDef::Entry { text } => {
                add_entry(&mut column, node, text);
            }
        }
    }
    column
}

fn add_checkbox(
    column: &mut LinearLayout,
    node: &LiveNode,
    path: &str,
    text: &str,
    sub_frame: Option<&FrameDef>,
) {
    let Some(slot) = node.bool_slot(text) else {
        warn!("no bool slot bound for checkbox {text:?}");
        return;
    };
    let slot = slot.clone();

    match sub_frame {
        Some(sub) => {
            let sub_key = format!("{SUB_FRAME_KEY_PREFIX}{text}");
            let Some(sub_tree) = node.sub_tree(&sub_key) else {
                warn!("no sub tree bound for checkbox {text:?}");
                return;
            };
            let view_name = format!("{path}.{text}");

            let checkbox = Checkbox::new().on_change({
                let name = view_name.clone();
                move |siv, checked| {
                    slot.set(checked);
                    siv.call_on_name(&name, |view: &mut SubFrameView| {
                        view.set_visible(checked);
                    });
                }
            });
            column.add_child(
                LinearLayout::horizontal()
                    .child(checkbox)
                    .child(TextView::new(format!(" {text}"))),
            );

            let inner = frame_view(sub, &sub_tree.node, &view_name);
            // Sub-frames start hidden; the checkbox default is unchecked.
            let mut hideable = HideableView::new(Panel::new(inner).title(sub.name.clone()));
            hideable.hide();
            column.add_child(hideable.with_name(view_name));
        }
        None => {
            let checkbox = Checkbox::new().on_change(move |_siv, checked| slot.set(checked));
            column.add_child(
                LinearLayout::horizontal()
                    .child(checkbox)
                    .child(TextView::new(format!(" {text}"))),
            );
        }
    }
}

fn add_entry(column: &mut LinearLayout, node: &LiveNode, text: &str) {
    let Some(slot) = node.text_slot(text) else {
        warn!("no text slot bound for entry {text:?}");
        return;
    };
    let slot = slot.clone();

    column.add_child(
        LinearLayout::horizontal()
            .child(TextView::new(format!("{text}: ")))
            .child(
                EditView::new()
                    .on_edit(move |_siv, content, _cursor| slot.set(content))
                    .fixed_width(40),
            ),
    );
}
