//! Session state container and wizard navigation.
//!
//! [`AppData`] is stored as cursive user data and mutated only from UI
//! callbacks on the single event-loop thread. The navigation transitions are
//! plain methods so the page-sequencing rules can be tested without a
//! terminal.

use std::path::PathBuf;
use std::rc::Rc;

use crate::data::record::{CollectedRecord, RecordFragment};
use crate::data::schema::{FormSchema, FrameDef, SchemaError};
use crate::data::tree::LiveNode;

/// Wizard position within the page flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    /// Waiting for the user to pick an option.
    SelectingOption,
    /// Showing frame `index` of `option`.
    OnFrame { option: String, index: usize },
}

/// Outcome of completing the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// More frames follow; the next one should be shown.
    NextFrame,
    /// The last frame was completed; the record is ready for export.
    Finished,
}

/// Application state for one wizard session.
pub struct AppData {
    /// Loaded form definition, read-only for the whole run.
    pub schema: FormSchema,
    /// Answers accumulated across completed frames.
    pub record: CollectedRecord,
    /// Directory the exported document is written to.
    pub output_dir: PathBuf,
    state: WizardState,
    live: Option<Rc<LiveNode>>,
}

impl AppData {
    pub fn new(schema: FormSchema, output_dir: PathBuf) -> Self {
        AppData {
            schema,
            record: CollectedRecord::default(),
            output_dir,
            state: WizardState::SelectingOption,
            live: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Starts the wizard for the chosen option.
    ///
    /// Begins a fresh sub-record for the option, overwriting any prior run
    /// under the same name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the option is unknown or has no
    /// frames.
    pub fn select_option(&mut self, name: &str) -> Result<(), SchemaError> {
        self.schema.option(name)?;
        self.record.begin_option(name);
        self.state = WizardState::OnFrame {
            option: name.to_string(),
            index: 0,
        };
        Ok(())
    }

    /// Definition of the currently shown frame, if any.
    pub fn current_frame(&self) -> Option<&FrameDef> {
        let WizardState::OnFrame { option, index } = &self.state else {
            return None;
        };
        self.schema.options.get(option)?.frames.get(*index)
    }

    fn frame_count(&self) -> usize {
        match &self.state {
            WizardState::OnFrame { option, .. } => self
                .schema
                .options
                .get(option)
                .map(|o| o.frames.len())
                .unwrap_or(0),
            WizardState::SelectingOption => 0,
        }
    }

    pub fn is_last_frame(&self) -> bool {
        match &self.state {
            WizardState::OnFrame { index, .. } => *index + 1 == self.frame_count(),
            WizardState::SelectingOption => false,
        }
    }

    /// Back navigation is only available past the first frame.
    pub fn can_go_back(&self) -> bool {
        matches!(&self.state, WizardState::OnFrame { index, .. } if *index > 0)
    }

    /// Steps back one frame, discarding the current page's live tree
    /// without collecting it. Unsaved edits are intentionally lost.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        if let WizardState::OnFrame { index, .. } = &mut self.state {
            *index -= 1;
        }
        self.live = None;
        true
    }

    /// Merges the fragment collected from the current frame into the record.
    pub fn save_current(&mut self, fragment: RecordFragment) {
        let WizardState::OnFrame { option, .. } = &self.state else {
            return;
        };
        let Some(frame) = self.current_frame() else {
            return;
        };
        let option = option.clone();
        let frame = frame.name.clone();
        self.record.insert_frame(&option, &frame, fragment);
    }

    /// Moves to the next frame, or reports that the sequence is complete.
    ///
    /// On the last frame the state is left untouched so a failed export
    /// keeps the current page for a retry; [`reset`](Self::reset) finishes
    /// the run after a successful export.
    pub fn advance(&mut self) -> Advance {
        if self.is_last_frame() {
            return Advance::Finished;
        }
        if let WizardState::OnFrame { index, .. } = &mut self.state {
            *index += 1;
        }
        self.live = None;
        Advance::NextFrame
    }

    /// Returns to option selection. The record is retained; a new selection
    /// of the same option starts a fresh sub-record.
    pub fn reset(&mut self) {
        self.state = WizardState::SelectingOption;
        self.live = None;
    }

    /// Step indicator shown above the frame controls.
    pub fn nav_label(&self) -> String {
        match &self.state {
            WizardState::OnFrame { option, index } => {
                format!("{option} - Schritt {} von {}", index + 1, self.frame_count())
            }
            WizardState::SelectingOption => String::new(),
        }
    }

    /// Binds the live tree of the page being displayed.
    pub fn set_live(&mut self, node: Rc<LiveNode>) {
        self.live = Some(node);
    }

    pub fn live(&self) -> Option<&Rc<LiveNode>> {
        self.live.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::FormSchema;
    use serde_json::json;

    const SAMPLE_JSON: &str = r#"
    {
        "options": {
            "Inspection": {
                "frames": [
                    {
                        "name": "Basics",
                        "controls": [
                            { "type": "checkbox", "text": "Passed" },
                            { "type": "entry", "text": "Notes" }
                        ]
                    },
                    {
                        "name": "Details",
                        "controls": [
                            {
                                "type": "checkbox",
                                "text": "Critical",
                                "sub_frame": {
                                    "name": "Critical details",
                                    "controls": [
                                        { "type": "entry", "text": "Reason" }
                                    ]
                                }
                            }
                        ]
                    }
                ]
            },
            "Empty": { "frames": [] }
        }
    }
    "#;

    fn app() -> AppData {
        let schema = FormSchema::parse(SAMPLE_JSON, "json", "test").unwrap();
        AppData::new(schema, PathBuf::from("."))
    }

    #[test]
    fn selecting_an_unknown_option_fails() {
        let mut app = app();
        assert!(app.select_option("Missing").is_err());
        assert_eq!(app.state(), &WizardState::SelectingOption);
    }

    #[test]
    fn empty_frame_list_is_rejected_lazily() {
        let mut app = app();
        let err = app.select_option("Empty").unwrap_err();
        assert!(matches!(err, SchemaError::NoFrames(name) if name == "Empty"));
        assert_eq!(app.state(), &WizardState::SelectingOption);
    }

    #[test]
    fn back_is_only_available_past_the_first_frame() {
        let mut app = app();
        app.select_option("Inspection").unwrap();
        assert!(!app.can_go_back());
        assert_eq!(app.advance(), Advance::NextFrame);
        assert!(app.can_go_back());
        assert!(app.go_back());
        assert!(!app.can_go_back());
    }

    #[test]
    fn advancing_through_all_frames_finishes_exactly_once() {
        let mut app = app();
        app.select_option("Inspection").unwrap();

        let mut finished = 0;
        for _ in 0..2 {
            app.save_current(RecordFragment::default());
            if app.advance() == Advance::Finished {
                finished += 1;
                app.reset();
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(app.state(), &WizardState::SelectingOption);
    }

    #[test]
    fn nav_label_shows_option_and_step() {
        let mut app = app();
        app.select_option("Inspection").unwrap();
        assert_eq!(app.nav_label(), "Inspection - Schritt 1 von 2");
        app.advance();
        assert_eq!(app.nav_label(), "Inspection - Schritt 2 von 2");
    }

    #[test]
    fn full_session_produces_the_expected_record() {
        use crate::data::tree::LiveNode;

        let mut app = app();
        app.select_option("Inspection").unwrap();

        // Basics: check "Passed", type "ok" into Notes, next.
        let node = LiveNode::build(app.current_frame().unwrap());
        node.bool_slot("Passed").unwrap().set(true);
        node.text_slot("Notes").unwrap().set("ok");
        app.save_current(node.collect());
        assert_eq!(app.advance(), Advance::NextFrame);

        // Details: check "Critical", type "leak" into Reason, finish.
        let node = LiveNode::build(app.current_frame().unwrap());
        node.bool_slot("Critical").unwrap().set(true);
        node.sub_tree("sub_frame_Critical")
            .unwrap()
            .node
            .text_slot("Reason")
            .unwrap()
            .set("leak");
        app.save_current(node.collect());
        assert_eq!(app.advance(), Advance::Finished);

        assert_eq!(
            app.record.as_json(),
            json!({
                "Inspection": {
                    "Basics": { "Passed": true, "Notes": "ok" },
                    "Details": {
                        "Critical": true,
                        "sub_frame_Critical": { "Reason": "leak" }
                    }
                }
            })
        );
    }
}
