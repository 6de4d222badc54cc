//! Form definition types and loading.
//!
//! A form definition describes named options, each an ordered sequence of
//! frames; a frame holds the controls of one wizard page. Definitions are
//! authored as JSON or TOML and loaded once at startup.

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or navigating a form definition.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("unsupported config file extension: {0:?}")]
    UnsupportedExtension(String),
    #[error("form definition contains no options")]
    NoOptions,
    #[error("option {0:?} is not defined")]
    UnknownOption(String),
    #[error("option {0:?} has no frames")]
    NoFrames(String),
}

/// Top-level form definition: selectable options in declared order.
///
/// Immutable after load; the wizard only ever reads from it.
#[derive(Debug, Clone, Deserialize)]
pub struct FormSchema {
    /// Options by name, in document order.
    pub options: IndexMap<String, OptionDef>,
}

/// One selectable option: an ordered sequence of frames.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionDef {
    /// Wizard pages in traversal order.
    pub frames: Vec<FrameDef>,
}

/// One wizard page: a titled, optionally described list of controls.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameDef {
    /// Page title, also the key the collected data is stored under.
    pub name: String,
    /// Explanatory text shown above the controls.
    #[serde(default)]
    pub description: Option<String>,
    /// Controls in display order. May be empty.
    #[serde(default)]
    pub controls: Vec<ControlDef>,
}

/// A single input element.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlDef {
    /// Boolean checkbox, optionally owning a nested sub-frame that is
    /// visible only while the checkbox is checked.
    Checkbox {
        text: String,
        #[serde(default)]
        sub_frame: Option<FrameDef>,
    },
    /// Free-text entry field.
    Entry { text: String },
}

impl ControlDef {
    /// Label of the control, which also keys its collected value.
    pub fn text(&self) -> &str {
        match self {
            ControlDef::Checkbox { text, .. } => text,
            ControlDef::Entry { text } => text,
        }
    }
}

impl FormSchema {
    /// Loads a form definition from a JSON or TOML file.
    ///
    /// The format is chosen by file extension, and a definition without any
    /// options is rejected immediately.
    ///
    /// # Errors
    ///
    /// Returns errors when the file cannot be read or parsed, the extension
    /// is not supported, or the definition is empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        Self::parse(&content, ext, &path.display().to_string())
    }

    /// Parses a form definition from already-loaded content.
    ///
    /// `ext` selects the format (`json`, `toml` or `tml`); `origin` names the
    /// source in error messages. Deserializing straight from the source text
    /// keeps the options in document order.
    pub fn parse(content: &str, ext: &str, origin: &str) -> Result<Self, SchemaError> {
        let parse_err = |message: String| SchemaError::Parse {
            path: origin.to_string(),
            message,
        };

        let schema: FormSchema = match ext {
            "json" => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            "toml" | "tml" => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            _ => {
                return Err(SchemaError::UnsupportedExtension(ext.to_string()));
            }
        };

        if schema.options.is_empty() {
            return Err(SchemaError::NoOptions);
        }
        Ok(schema)
    }

    /// Looks up an option and verifies it has at least one frame.
    ///
    /// An empty frame list is a configuration error raised lazily here, the
    /// first time the option is selected.
    pub fn option(&self, name: &str) -> Result<&OptionDef, SchemaError> {
        let option = self
            .options
            .get(name)
            .ok_or_else(|| SchemaError::UnknownOption(name.to_string()))?;
        if option.frames.is_empty() {
            return Err(SchemaError::NoFrames(name.to_string()));
        }
        Ok(option)
    }

    /// Option names in declared order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"
    {
        "options": {
            "Inspection": {
                "frames": [
                    {
                        "name": "Basics",
                        "description": "General checks",
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
            "Maintenance": { "frames": [ { "name": "Log", "controls": [] } ] }
        }
    }
    "#;

    #[test]
    fn parses_json_definition() {
        let schema = FormSchema::parse(SAMPLE_JSON, "json", "test").unwrap();
        let option = schema.option("Inspection").unwrap();
        assert_eq!(option.frames.len(), 2);
        assert_eq!(option.frames[0].name, "Basics");
        assert_eq!(
            option.frames[0].description.as_deref(),
            Some("General checks")
        );
        assert_eq!(option.frames[0].controls.len(), 2);

        let ControlDef::Checkbox { text, sub_frame } = &option.frames[1].controls[0] else {
            panic!("expected checkbox control");
        };
        assert_eq!(text, "Critical");
        let sub = sub_frame.as_ref().unwrap();
        assert_eq!(sub.name, "Critical details");
        assert_eq!(sub.controls[0].text(), "Reason");
    }

    #[test]
    fn option_order_is_preserved() {
        let schema = FormSchema::parse(SAMPLE_JSON, "json", "test").unwrap();
        let names: Vec<_> = schema.option_names().collect();
        assert_eq!(names, ["Inspection", "Maintenance"]);
    }

    #[test]
    fn parses_toml_definition() {
        let content = r#"
            [[options.Inspection.frames]]
            name = "Basics"

            [[options.Inspection.frames.controls]]
            type = "checkbox"
            text = "Passed"

            [[options.Inspection.frames.controls]]
            type = "entry"
            text = "Notes"
        "#;
        let schema = FormSchema::parse(content, "toml", "test").unwrap();
        let option = schema.option("Inspection").unwrap();
        assert_eq!(option.frames[0].controls.len(), 2);
        assert_eq!(option.frames[0].controls[0].text(), "Passed");
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = FormSchema::parse("{}", "yaml", "test").unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedExtension(ext) if ext == "yaml"));
    }

    #[test]
    fn rejects_empty_definition() {
        let err = FormSchema::parse(r#"{ "options": {} }"#, "json", "test").unwrap_err();
        assert!(matches!(err, SchemaError::NoOptions));
    }

    #[test]
    fn unknown_option_is_an_error() {
        let schema = FormSchema::parse(SAMPLE_JSON, "json", "test").unwrap();
        let err = schema.option("Missing").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownOption(name) if name == "Missing"));
    }

    #[test]
    fn empty_frame_list_is_detected_on_selection() {
        let content = r#"{ "options": { "Empty": { "frames": [] } } }"#;
        let schema = FormSchema::parse(content, "json", "test").unwrap();
        let err = schema.option("Empty").unwrap_err();
        assert!(matches!(err, SchemaError::NoFrames(name) if name == "Empty"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = FormSchema::load("does-not-exist.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }

    #[test]
    fn load_reads_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.json");
        std::fs::write(&path, SAMPLE_JSON).unwrap();
        let schema = FormSchema::load(&path).unwrap();
        assert_eq!(schema.options.len(), 2);
    }
}
