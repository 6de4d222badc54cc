//! Live value slots and the form-tree walker.
//!
//! When a frame is displayed, [`LiveNode::build`] walks its definition and
//! instantiates one value slot per control, in declared order. The UI binds
//! widgets to these slots; [`LiveNode::collect`] later extracts the current
//! values into a [`RecordFragment`] of the same shape. The tree is scoped to
//! the displayed page and dropped on navigation, so values must be collected
//! before teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::data::record::{FieldValue, RecordFragment};
use crate::data::schema::{ControlDef, FrameDef};

/// Key prefix for nested sub-frame bindings.
pub const SUB_FRAME_KEY_PREFIX: &str = "sub_frame_";

/// Boolean value slot with synchronously notified subscribers.
///
/// Subscribers are invoked on every [`set`](Self::set) before it returns, so
/// dependent state (sub-frame visibility) is always consistent with the
/// latest value before the user can interact further.
#[derive(Default)]
pub struct BoolSlot {
    value: Cell<bool>,
    subscribers: RefCell<Vec<Box<dyn FnMut(bool)>>>,
}

impl BoolSlot {
    pub fn get(&self) -> bool {
        self.value.get()
    }

    /// Updates the value and notifies every subscriber.
    pub fn set(&self, value: bool) {
        self.value.set(value);
        for subscriber in self.subscribers.borrow_mut().iter_mut() {
            subscriber(value);
        }
    }

    /// Registers a subscriber invoked on every subsequent value change.
    pub fn subscribe(&self, subscriber: impl FnMut(bool) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }
}

/// Free-text value slot.
#[derive(Default)]
pub struct TextSlot {
    value: RefCell<String>,
}

impl TextSlot {
    pub fn get(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

/// Nested sub-frame bound to its owning checkbox.
///
/// The `visible` flag is kept equal to the owning checkbox value by a
/// subscriber installed by the walker; it only drives display, never
/// collection.
pub struct SubTree {
    visible: Rc<Cell<bool>>,
    pub node: LiveNode,
}

impl SubTree {
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

/// A value slot bound to one control of the displayed page.
pub enum ValueSlot {
    Bool(Rc<BoolSlot>),
    Text(Rc<TextSlot>),
    SubTree(SubTree),
}

/// Runtime mirror of a frame definition: one binding per control, in
/// declared order, plus one `sub_frame_<text>` binding per nested sub-frame.
#[derive(Default)]
pub struct LiveNode {
    bindings: Vec<(String, ValueSlot)>,
}

impl LiveNode {
    /// Walks the frame definition and instantiates the value slots.
    ///
    /// Checkboxes get a `Bool` slot starting `false`, entries a `Text` slot
    /// starting empty. A checkbox carrying a sub-frame additionally gets a
    /// recursively built child node whose visibility follows the checkbox
    /// value. An empty control list yields an empty node.
    pub fn build(frame: &FrameDef) -> Self {
        let mut bindings = Vec::new();
        for control in &frame.controls {
            match control {
                ControlDef::Checkbox { text, sub_frame } => {
                    let slot = Rc::new(BoolSlot::default());
                    if let Some(sub) = sub_frame {
                        let child = LiveNode::build(sub);
                        let visible = Rc::new(Cell::new(false));
                        let link = visible.clone();
                        slot.subscribe(move |checked| link.set(checked));
                        bindings.push((text.clone(), ValueSlot::Bool(slot)));
                        bindings.push((
                            format!("{SUB_FRAME_KEY_PREFIX}{text}"),
                            ValueSlot::SubTree(SubTree {
                                visible,
                                node: child,
                            }),
                        ));
                    } else {
                        bindings.push((text.clone(), ValueSlot::Bool(slot)));
                    }
                }
                ControlDef::Entry { text } => {
                    bindings.push((text.clone(), ValueSlot::Text(Rc::new(TextSlot::default()))));
                }
            }
        }
        LiveNode { bindings }
    }

    /// Extracts the current values into a fragment of the same shape,
    /// depth-first and in declaration order.
    ///
    /// Sub-trees are collected regardless of their current visibility: an
    /// unchecked checkbox still contributes its hidden sub-fields with
    /// whatever values they hold.
    pub fn collect(&self) -> RecordFragment {
        let mut fragment = RecordFragment::default();
        for (key, slot) in &self.bindings {
            let value = match slot {
                ValueSlot::Bool(slot) => FieldValue::Bool(slot.get()),
                ValueSlot::Text(slot) => FieldValue::Text(slot.get()),
                ValueSlot::SubTree(sub) => FieldValue::Group(sub.node.collect()),
            };
            fragment.push(key.clone(), value);
        }
        fragment
    }

    /// Bindings in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = &(String, ValueSlot)> {
        self.bindings.iter()
    }

    pub fn get(&self, key: &str) -> Option<&ValueSlot> {
        self.bindings
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, slot)| slot)
    }

    pub fn bool_slot(&self, key: &str) -> Option<&Rc<BoolSlot>> {
        match self.get(key) {
            Some(ValueSlot::Bool(slot)) => Some(slot),
            _ => None,
        }
    }

    pub fn text_slot(&self, key: &str) -> Option<&Rc<TextSlot>> {
        match self.get(key) {
            Some(ValueSlot::Text(slot)) => Some(slot),
            _ => None,
        }
    }

    pub fn sub_tree(&self, key: &str) -> Option<&SubTree> {
        match self.get(key) {
            Some(ValueSlot::SubTree(sub)) => Some(sub),
            _ => None,
        }
    }
}
