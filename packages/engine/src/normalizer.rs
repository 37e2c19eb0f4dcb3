//! # Tree Normalizer
//!
//! Turns any JSON value into a [`Document`] that is safe to hand to a
//! rendering surface:
//!
//! - every node in `content`, `zones` and nested slots has a registered type
//! - every node has a non-empty `id` and `key`
//! - `root` always exists with object props and a non-empty id
//! - `zones` only holds the entries that were arrays
//!
//! Normalization never fails. Malformed input degrades to dropped nodes or
//! defaults. Content that was declared but entirely invalid is replaced by a
//! single fallback notice so a broken page is never silently blank; genuinely
//! empty content stays empty.

use crate::identity::{ensure_string_id, generate_safe_id};
use pagetree_ast::{is_slot_array, BlockKind, Document, Node, PropValue, Props, Root, ROOT_ID};
use pagetree_common::TypeRegistry;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Deepest slot nesting the engine descends into
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Node inserted when declared content was entirely invalid
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackNode {
    pub kind: BlockKind,
    pub props: Props,
}

impl Default for FallbackNode {
    fn default() -> Self {
        let mut props = Props::new();
        props.insert("variant".to_string(), PropValue::from("info"));
        props.insert("title".to_string(), PropValue::from("Welcome"));
        props.insert(
            "text".to_string(),
            PropValue::from("This page's saved content could not be displayed. Add blocks to start building it again."),
        );
        Self {
            kind: BlockKind::Alert,
            props,
        }
    }
}

impl FallbackNode {
    fn to_node(&self) -> Node {
        let id = generate_safe_id(self.kind.as_str(), 0);
        Node {
            kind: self.kind.clone(),
            props: self.props.clone(),
            key: id.clone(),
            id,
            read_only: false,
        }
    }
}

/// Options for normalization
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Slots nested deeper than this are kept verbatim and not descended into
    pub max_depth: usize,
    pub fallback: FallbackNode,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            fallback: FallbackNode::default(),
        }
    }
}

/// Normalizes untrusted documents against a type registry
pub struct Normalizer<'r, R: TypeRegistry + ?Sized> {
    registry: &'r R,
    options: NormalizeOptions,
}

impl<'r, R: TypeRegistry + ?Sized> Normalizer<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            options: NormalizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a raw JSON document
    #[instrument(skip_all)]
    pub fn normalize(&self, input: &Value) -> Document {
        let Some(object) = input.as_object() else {
            debug!("Input is not an object - returning empty document");
            return Document::default();
        };

        let (mut content, declared) = match object.get("content") {
            Some(Value::Array(items)) => (self.normalize_list(items, 0), items.len()),
            Some(_) => {
                debug!("content is not an array - treating as empty");
                (Vec::new(), 0)
            }
            None => (Vec::new(), 0),
        };

        if declared > 0 && content.is_empty() {
            self.push_fallback(&mut content, declared);
        }

        let root = self.normalize_root(object.get("root"));
        let zones = self.normalize_zones(object.get("zones"));

        info!(
            declared,
            content = content.len(),
            zones = zones.len(),
            "Document normalization complete"
        );

        Document {
            content,
            root,
            zones,
        }
    }

    /// Re-establish the document invariants on an in-memory document,
    /// e.g. after a batch of programmatic edits
    #[instrument(skip_all)]
    pub fn renormalize(&self, doc: Document) -> Document {
        let Document {
            content,
            mut root,
            zones,
        } = doc;

        let declared = content.len();
        let mut content = self.retain_list(content, 0);
        if declared > 0 && content.is_empty() {
            self.push_fallback(&mut content, declared);
        }

        if root.id.is_empty() {
            root.id = ROOT_ID.to_string();
        }
        root.props = self.retain_props(root.props, 0);

        let zones = zones
            .into_iter()
            .map(|(name, nodes)| (name, self.retain_list(nodes, 0)))
            .collect();

        Document {
            content,
            root,
            zones,
        }
    }

    fn push_fallback(&self, content: &mut Vec<Node>, declared: usize) {
        let fallback = &self.options.fallback;
        if !self.registry.is_known_kind(&fallback.kind) {
            warn!(
                declared,
                fallback_type = %fallback.kind,
                "All content was invalid but the fallback type is not registered - leaving content empty"
            );
            return;
        }

        warn!(declared, "All content was invalid - inserting fallback node");
        content.push(fallback.to_node());
    }

    fn normalize_list(&self, items: &[Value], depth: usize) -> Vec<Node> {
        items
            .iter()
            .filter_map(|item| self.accept(item))
            .enumerate()
            .map(|(index, (type_name, object))| self.normalize_node(type_name, object, index, depth))
            .collect()
    }

    /// Returns the type name and fields of `item` when it is a valid node
    fn accept<'v>(&self, item: &'v Value) -> Option<(&'v str, &'v Map<String, Value>)> {
        let Some(object) = item.as_object() else {
            debug!("Dropping non-object entry");
            return None;
        };

        let Some(type_name) = object.get("type").and_then(Value::as_str) else {
            debug!("Dropping entry without a string type");
            return None;
        };

        if !self.registry.is_known_type(type_name) {
            debug!(type_name, "Dropping entry with unknown type");
            return None;
        }

        Some((type_name, object))
    }

    fn normalize_node(
        &self,
        type_name: &str,
        object: &Map<String, Value>,
        index: usize,
        depth: usize,
    ) -> Node {
        let seed = generate_safe_id(type_name, index);

        let props = match object.get("props") {
            Some(Value::Object(props)) => self.normalize_props(props, depth),
            _ => Props::new(),
        };

        Node {
            kind: BlockKind::from_name(type_name),
            props,
            id: ensure_string_id(object.get("id"), &seed),
            key: ensure_string_id(object.get("key"), &seed),
            read_only: is_truthy(object.get("readOnly")),
        }
    }

    /// A prop array is a slot when every entry reads as a block: node-shaped
    /// and either of a registered type or carrying an `id` or `props` field.
    /// Other arrays (`[{ "type": "external", "href": .. }]`) are user data.
    fn is_slot(&self, items: &[Value]) -> bool {
        is_slot_array(items) && items.iter().all(|item| self.reads_as_block(item))
    }

    fn reads_as_block(&self, item: &Value) -> bool {
        let Some(object) = item.as_object() else {
            return false;
        };
        let registered = object
            .get("type")
            .and_then(Value::as_str)
            .map(|type_name| self.registry.is_known_type(type_name))
            .unwrap_or(false);
        registered || object.contains_key("id") || object.contains_key("props")
    }

    /// Classify props, normalizing block arrays as slots
    fn normalize_props(&self, props: &Map<String, Value>, depth: usize) -> Props {
        props
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::Array(items) if self.is_slot(items) => {
                        if depth < self.options.max_depth {
                            PropValue::Slot(self.normalize_list(items, depth + 1))
                        } else {
                            warn!(slot = %name, depth, "Slot nesting too deep - keeping it verbatim");
                            PropValue::Value(value.clone())
                        }
                    }
                    other => PropValue::Value(other.clone()),
                };
                (name.clone(), value)
            })
            .collect()
    }

    fn normalize_root(&self, root: Option<&Value>) -> Root {
        let object = root.and_then(Value::as_object);

        let props = match object.and_then(|root| root.get("props")) {
            Some(Value::Object(props)) => self.normalize_props(props, 0),
            _ => Root::default().props,
        };

        Root {
            props,
            id: ensure_string_id(object.and_then(|root| root.get("id")), ROOT_ID),
            read_only: is_truthy(object.and_then(|root| root.get("readOnly"))),
        }
    }

    fn normalize_zones(&self, zones: Option<&Value>) -> BTreeMap<String, Vec<Node>> {
        let Some(zones) = zones.and_then(Value::as_object) else {
            return BTreeMap::new();
        };

        zones
            .iter()
            .filter_map(|(name, value)| match value {
                Value::Array(items) => Some((name.clone(), self.normalize_list(items, 0))),
                _ => {
                    debug!(zone = %name, "Dropping zone that is not an array");
                    None
                }
            })
            .collect()
    }

    fn retain_list(&self, nodes: Vec<Node>, depth: usize) -> Vec<Node> {
        nodes
            .into_iter()
            .filter(|node| {
                let known = self.registry.is_known_kind(&node.kind);
                if !known {
                    debug!(type_name = %node.kind, id = %node.id, "Dropping node with unknown type");
                }
                known
            })
            .enumerate()
            .map(|(index, mut node)| {
                if node.id.is_empty() || node.key.is_empty() {
                    let seed = generate_safe_id(node.kind.as_str(), index);
                    if node.id.is_empty() {
                        node.id = seed.clone();
                    }
                    if node.key.is_empty() {
                        node.key = seed;
                    }
                }
                node.props = self.retain_props(node.props, depth);
                node
            })
            .collect()
    }

    fn retain_props(&self, props: Props, depth: usize) -> Props {
        props
            .into_iter()
            .map(|(name, value)| match value {
                PropValue::Slot(children) if depth < self.options.max_depth => {
                    (name, PropValue::Slot(self.retain_list(children, depth + 1)))
                }
                other => (name, other),
            })
            .collect()
    }
}

/// Normalize `input` with default options
pub fn normalize<R: TypeRegistry + ?Sized>(input: &Value, registry: &R) -> Document {
    Normalizer::new(registry).normalize(input)
}

/// JSON truthiness: `false`, `null`, `0`, `""` and absence are false
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
