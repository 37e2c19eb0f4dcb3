use crate::node::{Node, PropValue, Props};
use serde::Serialize;
use std::collections::BTreeMap;

/// Title given to pages created without root props
pub const DEFAULT_PAGE_TITLE: &str = "New Page";

/// Id of the root node when the stored one is unusable
pub const ROOT_ID: &str = "root";

/// Page-level metadata node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Root {
    pub props: Props,
    pub id: String,
    #[serde(rename = "readOnly")]
    pub read_only: bool,
}

impl Root {
    pub fn title(&self) -> Option<&str> {
        self.props.get("title").and_then(PropValue::as_str)
    }
}

impl Default for Root {
    fn default() -> Self {
        let mut props = Props::new();
        props.insert("title".to_string(), PropValue::from(DEFAULT_PAGE_TITLE));
        Self {
            props,
            id: ROOT_ID.to_string(),
            read_only: false,
        }
    }
}

/// Page content tree
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Document {
    /// Page body in render order
    pub content: Vec<Node>,
    pub root: Root,
    /// Named secondary drop zones
    pub zones: BTreeMap<String, Vec<Node>>,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    pub fn with_zone(mut self, name: impl Into<String>, nodes: Vec<Node>) -> Self {
        self.zones.insert(name.into(), nodes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.zones.values().all(Vec::is_empty)
    }

    /// Count of every node in content, zones and nested slots
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| 1 + node.slots().map(|(_, children)| count(children)).sum::<usize>())
                .sum()
        }

        count(&self.content) + self.zones.values().map(|nodes| count(nodes)).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::BlockKind;
    use serde_json::json;

    #[test]
    fn test_default_document() {
        let doc = Document::default();
        assert!(doc.content.is_empty());
        assert!(doc.zones.is_empty());
        assert_eq!(doc.root.id, "root");
        assert_eq!(doc.root.title(), Some("New Page"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let doc = Document::new(vec![Node::new(BlockKind::Divider, "d1")]).with_zone("sidebar", vec![]);

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "content": [
                    { "type": "Divider", "props": {}, "id": "d1", "key": "d1", "readOnly": false }
                ],
                "root": { "props": { "title": "New Page" }, "id": "root", "readOnly": false },
                "zones": { "sidebar": [] }
            })
        );
    }

    #[test]
    fn test_node_count_includes_slots_and_zones() {
        let inner = Node::new(BlockKind::Flex, "inner").with_slot("items", vec![Node::new(BlockKind::Text, "t")]);
        let outer = Node::new(BlockKind::Grid, "outer").with_slot("items", vec![inner]);
        let doc = Document::new(vec![outer]).with_zone("footer", vec![Node::new(BlockKind::Button, "b")]);

        assert_eq!(doc.node_count(), 4);
        assert!(!doc.is_empty());
    }
}
