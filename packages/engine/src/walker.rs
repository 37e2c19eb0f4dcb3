//! Whole-tree rewrites.
//!
//! [`walk`] hands every node list in a document to a caller-supplied
//! transform: `content`, each zone, the root's slots and every slot nested
//! inside a node's props. Lists are transformed parent first; the walker then
//! descends into the slots of the nodes the transform returned. The document
//! is consumed and rebuilt, never aliased.

use crate::normalizer::{NormalizeOptions, DEFAULT_MAX_DEPTH};
use pagetree_ast::{Document, Node, PropValue, Props};
use std::collections::BTreeMap;
use std::convert::Infallible;
use tracing::warn;

/// Options for walking a document
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    /// Slot lists nested deeper than this are left untouched
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl From<&NormalizeOptions> for WalkOptions {
    fn from(options: &NormalizeOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }
}

/// Apply `transform` to every node list in `doc`.
///
/// The first error returned by `transform` aborts the walk and is returned
/// unchanged.
pub fn walk<F, E>(doc: Document, transform: F) -> Result<Document, E>
where
    F: FnMut(Vec<Node>) -> Result<Vec<Node>, E>,
{
    walk_with_options(doc, WalkOptions::default(), transform)
}

pub fn walk_with_options<F, E>(doc: Document, options: WalkOptions, transform: F) -> Result<Document, E>
where
    F: FnMut(Vec<Node>) -> Result<Vec<Node>, E>,
{
    let mut walker = Walker {
        transform,
        max_depth: options.max_depth,
    };
    walker.walk_document(doc)
}

/// Walk a bare node list, e.g. a clipboard fragment
pub fn walk_nodes<F, E>(nodes: Vec<Node>, transform: F) -> Result<Vec<Node>, E>
where
    F: FnMut(Vec<Node>) -> Result<Vec<Node>, E>,
{
    let mut walker = Walker {
        transform,
        max_depth: DEFAULT_MAX_DEPTH,
    };
    walker.walk_list(nodes, 0)
}

/// [`walk`] for transforms that cannot fail
pub fn map_lists<F>(doc: Document, transform: F) -> Document
where
    F: FnMut(Vec<Node>) -> Vec<Node>,
{
    map_lists_with_options(doc, WalkOptions::default(), transform)
}

pub fn map_lists_with_options<F>(doc: Document, options: WalkOptions, mut transform: F) -> Document
where
    F: FnMut(Vec<Node>) -> Vec<Node>,
{
    match walk_with_options(doc, options, |nodes| Ok::<_, Infallible>(transform(nodes))) {
        Ok(doc) => doc,
        Err(never) => match never {},
    }
}

struct Walker<F> {
    transform: F,
    max_depth: usize,
}

impl<F, E> Walker<F>
where
    F: FnMut(Vec<Node>) -> Result<Vec<Node>, E>,
{
    fn walk_document(&mut self, doc: Document) -> Result<Document, E> {
        let Document {
            content,
            mut root,
            zones,
        } = doc;

        let content = self.walk_list(content, 0)?;
        root.props = self.walk_props(root.props, 0)?;

        let mut walked_zones = BTreeMap::new();
        for (name, nodes) in zones {
            let nodes = self.walk_list(nodes, 0)?;
            walked_zones.insert(name, nodes);
        }

        Ok(Document {
            content,
            root,
            zones: walked_zones,
        })
    }

    fn walk_list(&mut self, nodes: Vec<Node>, depth: usize) -> Result<Vec<Node>, E> {
        let nodes = (self.transform)(nodes)?;

        let mut walked = Vec::with_capacity(nodes.len());
        for mut node in nodes {
            node.props = self.walk_props(node.props, depth)?;
            walked.push(node);
        }
        Ok(walked)
    }

    fn walk_props(&mut self, props: Props, depth: usize) -> Result<Props, E> {
        let mut walked = Props::new();
        for (name, value) in props {
            let value = match value {
                PropValue::Slot(children) if depth < self.max_depth => {
                    PropValue::Slot(self.walk_list(children, depth + 1)?)
                }
                PropValue::Slot(children) => {
                    warn!(slot = %name, depth, "Slot nesting too deep - not walking it");
                    PropValue::Slot(children)
                }
                other => other,
            };
            walked.insert(name, value);
        }
        Ok(walked)
    }
}
