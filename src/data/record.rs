//! Collected answer records.
//!
//! A [`RecordFragment`] mirrors the shape of one live frame tree; the
//! [`CollectedRecord`] accumulates fragments per option and frame over the
//! whole session and is consumed once at export time.

use serde_json::Value;

/// A single collected field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Checkbox state, recorded verbatim.
    Bool(bool),
    /// Entry content, recorded verbatim (empty strings included).
    Text(String),
    /// Nested sub-frame fragment.
    Group(RecordFragment),
}

impl FieldValue {
    /// Serializes the value into JSON.
    pub fn as_json(&self) -> Value {
        match self {
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Group(fragment) => fragment.as_json(),
        }
    }
}

/// Ordered key/value pairs collected from one frame tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFragment {
    fields: Vec<(String, FieldValue)>,
}

impl RecordFragment {
    /// Appends a field, preserving declaration order.
    pub fn push(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.push((key.into(), value));
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serializes the fragment into a JSON object.
    pub fn as_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.as_json());
        }
        Value::Object(map)
    }
}

/// Session-wide answer store: option name → frame name → fragment.
///
/// Built incrementally as frames are completed. Re-selecting an option
/// replaces its sub-record; re-saving a frame replaces that frame's fragment.
#[derive(Debug, Clone, Default)]
pub struct CollectedRecord {
    options: Vec<(String, Vec<(String, RecordFragment)>)>,
}

impl CollectedRecord {
    /// Starts a fresh sub-record for `option`, overwriting any prior run
    /// under the same name.
    pub fn begin_option(&mut self, option: &str) {
        self.options.retain(|(name, _)| name != option);
        self.options.push((option.to_string(), Vec::new()));
    }

    /// Stores the fragment collected from one completed frame.
    pub fn insert_frame(&mut self, option: &str, frame: &str, fragment: RecordFragment) {
        let index = match self.options.iter().position(|(name, _)| name == option) {
            Some(index) => index,
            None => {
                self.options.push((option.to_string(), Vec::new()));
                self.options.len() - 1
            }
        };
        let frames = &mut self.options[index].1;
        match frames.iter_mut().find(|(name, _)| name == frame) {
            Some((_, existing)) => *existing = fragment,
            None => frames.push((frame.to_string(), fragment)),
        }
    }

    /// Options with their completed frames, in completion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(String, RecordFragment)])> {
        self.options
            .iter()
            .map(|(name, frames)| (name.as_str(), frames.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Serializes the whole record into a JSON object.
    pub fn as_json(&self) -> Value {
        let mut root = serde_json::Map::new();
        for (option, frames) in &self.options {
            let mut frames_map = serde_json::Map::new();
            for (frame, fragment) in frames {
                frames_map.insert(frame.clone(), fragment.as_json());
            }
            root.insert(option.clone(), Value::Object(frames_map));
        }
        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_fragment() -> RecordFragment {
        let mut fragment = RecordFragment::default();
        fragment.push("Passed", FieldValue::Bool(true));
        fragment.push("Notes", FieldValue::Text("ok".to_string()));
        fragment
    }

    #[test]
    fn fragment_serializes_nested_groups() {
        let mut inner = RecordFragment::default();
        inner.push("Reason", FieldValue::Text("leak".to_string()));
        let mut fragment = RecordFragment::default();
        fragment.push("Critical", FieldValue::Bool(true));
        fragment.push("sub_frame_Critical", FieldValue::Group(inner));

        assert_eq!(
            fragment.as_json(),
            json!({ "Critical": true, "sub_frame_Critical": { "Reason": "leak" } })
        );
    }

    #[test]
    fn reselecting_an_option_replaces_its_sub_record() {
        let mut record = CollectedRecord::default();
        record.begin_option("Inspection");
        record.insert_frame("Inspection", "Basics", sample_fragment());
        record.begin_option("Inspection");

        assert_eq!(record.as_json(), json!({ "Inspection": {} }));
    }

    #[test]
    fn resaving_a_frame_replaces_its_fragment() {
        let mut record = CollectedRecord::default();
        record.begin_option("Inspection");
        record.insert_frame("Inspection", "Basics", sample_fragment());

        let mut updated = RecordFragment::default();
        updated.push("Passed", FieldValue::Bool(false));
        record.insert_frame("Inspection", "Basics", updated);

        assert_eq!(
            record.as_json(),
            json!({ "Inspection": { "Basics": { "Passed": false } } })
        );
    }

    #[test]
    fn options_accumulate_in_completion_order() {
        let mut record = CollectedRecord::default();
        record.begin_option("B");
        record.insert_frame("B", "F", RecordFragment::default());
        record.begin_option("A");
        record.insert_frame("A", "F", RecordFragment::default());

        let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["B", "A"]);
    }
}
