use pagetree_ast::{Document, Node, Root};

/// Where a list of nodes lives in the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListOwner<'a> {
    Content,
    Zone(&'a str),
    Slot { parent: &'a Node, name: &'a str },
    RootSlot { name: &'a str },
}

/// Visitor pattern for traversing a page tree immutably
///
/// This trait provides default implementations that walk the entire tree,
/// parent before children. Override specific visit_* methods to collect
/// information; call the matching walk_* function to keep descending.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_root(&mut self, root: &Root) {
        walk_root(self, root);
    }

    fn visit_list(&mut self, owner: ListOwner<'_>, nodes: &[Node]) {
        walk_list(self, owner, nodes);
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    visitor.visit_root(&doc.root);
    visitor.visit_list(ListOwner::Content, &doc.content);
    for (name, nodes) in &doc.zones {
        visitor.visit_list(ListOwner::Zone(name), nodes);
    }
}

pub fn walk_root<V: Visitor>(visitor: &mut V, root: &Root) {
    for (name, value) in &root.props {
        if let Some(nodes) = value.as_slot() {
            visitor.visit_list(ListOwner::RootSlot { name }, nodes);
        }
    }
}

pub fn walk_list<V: Visitor>(visitor: &mut V, _owner: ListOwner<'_>, nodes: &[Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for (name, children) in node.slots() {
        visitor.visit_list(
            ListOwner::Slot {
                parent: node,
                name,
            },
            children,
        );
    }
}
