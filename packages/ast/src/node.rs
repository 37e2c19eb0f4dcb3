use crate::kind::BlockKind;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Props bag of a node. Values are opaque to the engine except for slots.
pub type Props = BTreeMap<String, PropValue>;

/// A single prop value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Nested list of child blocks (container children, columns, ...)
    Slot(Vec<Node>),
    /// Anything else, carried through verbatim
    Value(Value),
}

impl PropValue {
    pub fn as_slot(&self) -> Option<&Vec<Node>> {
        match self {
            PropValue::Slot(nodes) => Some(nodes),
            PropValue::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PropValue::Value(value) => Some(value),
            PropValue::Slot(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::Value(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Value(Value::String(value.to_string()))
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Value(Value::String(value))
    }
}

impl From<Vec<Node>> for PropValue {
    fn from(nodes: Vec<Node>) -> Self {
        PropValue::Slot(nodes)
    }
}

/// A block in the page tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub props: Props,
    /// Stable identity used for selection and locking
    pub id: String,
    /// Render identity for list diffing; replaced freely
    pub key: String,
    #[serde(rename = "readOnly")]
    pub read_only: bool,
}

impl Node {
    pub fn new(kind: impl Into<BlockKind>, id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            kind: kind.into(),
            props: Props::new(),
            key: id.clone(),
            id,
            read_only: false,
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_slot(mut self, name: impl Into<String>, children: Vec<Node>) -> Self {
        self.props.insert(name.into(), PropValue::Slot(children));
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// `text` prop when it holds a string
    pub fn text(&self) -> Option<&str> {
        self.props.get("text").and_then(PropValue::as_str)
    }

    pub fn slot(&self, name: &str) -> Option<&Vec<Node>> {
        self.props.get(name).and_then(PropValue::as_slot)
    }

    /// Slot props in name order
    pub fn slots(&self) -> impl Iterator<Item = (&str, &Vec<Node>)> {
        self.props
            .iter()
            .filter_map(|(name, value)| value.as_slot().map(|nodes| (name.as_str(), nodes)))
    }

    pub fn has_slots(&self) -> bool {
        self.props.values().any(|value| value.as_slot().is_some())
    }
}

/// True when `value` looks like a serialized node: an object with a string `type`
pub fn is_node_shaped(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|object| object.get("type"))
        .map(Value::is_string)
        .unwrap_or(false)
}

/// True when a prop array can hold child nodes: it is empty or every entry
/// is node-shaped. Arrays mixing nodes with other values are plain data.
pub fn is_slot_array(items: &[Value]) -> bool {
    items.iter().all(is_node_shaped)
}
