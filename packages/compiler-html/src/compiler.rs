use pagetree_ast::{BlockKind, Document, Node};
use pagetree_engine::generate_safe_id;
use serde_json::Value;

/// Separator between text blocks in flattened output
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Cheap check for tree-shaped content: an object whose `content` is an array.
///
/// Says nothing about whether the nodes are valid; that is the normalizer's job.
pub fn is_tree_document(value: &Value) -> bool {
    value
        .as_object()
        .map(|object| matches!(object.get("content"), Some(Value::Array(_))))
        .unwrap_or(false)
}

/// Wrap legacy content in a single text block.
///
/// The string is stored verbatim as the block's `text` prop; markup inside it
/// is not interpreted. Blank input gives a document with no content.
pub fn html_to_document(html: &str) -> Document {
    if html.trim().is_empty() {
        return Document::default();
    }

    let id = generate_safe_id(BlockKind::Text.as_str(), 0);
    Document::new(vec![Node::new(BlockKind::Text, id).with_prop("text", html)])
}

/// Flatten a document to legacy content.
///
/// Joins the `text` prop of each top-level text block with a blank line.
/// Every other block, and anything nested in slots or zones, is dropped.
pub fn document_to_html(doc: &Document) -> String {
    doc.content
        .iter()
        .filter(|node| node.kind.is_text())
        .filter_map(Node::text)
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}
