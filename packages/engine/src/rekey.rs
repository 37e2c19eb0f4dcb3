//! Re-keying pass.
//!
//! Gives every node a fresh render key while keeping its id. Keys come from a
//! single [`IdGenerator`] per pass, so no two nodes in a pass share one.

use crate::identity::{generate_safe_id, IdGenerator};
use crate::walker::{map_lists_with_options, WalkOptions};
use pagetree_ast::{Document, Node, PropValue};

/// Rekey `nodes` and every node nested in their slots
pub fn rekey(nodes: Vec<Node>) -> Vec<Node> {
    let mut generator = IdGenerator::new();
    rekey_with(nodes, &mut generator, WalkOptions::default())
}

/// Rekey with a caller-owned generator, descending `options.max_depth` slots deep
pub fn rekey_with(nodes: Vec<Node>, generator: &mut IdGenerator, options: WalkOptions) -> Vec<Node> {
    rekey_list(nodes, generator, options.max_depth, 0)
}

fn rekey_list(nodes: Vec<Node>, generator: &mut IdGenerator, max_depth: usize, depth: usize) -> Vec<Node> {
    nodes
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            let mut node = assign_identity(node, index, generator);
            if depth < max_depth {
                for value in node.props.values_mut() {
                    if let PropValue::Slot(children) = value {
                        *children = rekey_list(std::mem::take(children), generator, max_depth, depth + 1);
                    }
                }
            }
            node
        })
        .collect()
}

/// Rekey every list in `doc`: content, zones and all slots
pub fn rekey_document(doc: Document) -> Document {
    rekey_document_with(doc, WalkOptions::default())
}

/// [`rekey_document`] for trees normalized with a non-default depth ceiling
pub fn rekey_document_with(doc: Document, options: WalkOptions) -> Document {
    let mut generator = IdGenerator::new();
    map_lists_with_options(doc, options, |nodes| {
        nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| assign_identity(node, index, &mut generator))
            .collect()
    })
}

fn assign_identity(mut node: Node, index: usize, generator: &mut IdGenerator) -> Node {
    if node.id.is_empty() {
        node.id = generate_safe_id(node.kind.as_str(), index);
    }
    node.key = generator.new_key(&node.kind);
    node
}
