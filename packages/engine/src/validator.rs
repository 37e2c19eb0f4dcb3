/// Structural checks for documents built or edited outside the normalizer
use pagetree_ast::{Document, Node, Root};
use pagetree_common::{walk_list, walk_node, walk_root, ListOwner, TypeRegistry, Visitor};
use serde::Serialize;
use std::collections::HashSet;

/// Validation warning level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationLevel {
    /// Works, but editing may misbehave
    Warning,
    /// Breaks a document invariant
    Error,
}

/// Validation warning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl ValidationWarning {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Warning,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Error,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == ValidationLevel::Error
    }
}

/// Validator for page documents
pub struct Validator<'r, R: TypeRegistry + ?Sized> {
    registry: &'r R,
    warnings: Vec<ValidationWarning>,
    seen_ids: HashSet<String>,
}

impl<'r, R: TypeRegistry + ?Sized> Validator<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            warnings: Vec::new(),
            seen_ids: HashSet::new(),
        }
    }

    /// Validate a document
    pub fn validate(&mut self, doc: &Document) -> Vec<ValidationWarning> {
        self.warnings.clear();
        self.seen_ids.clear();

        self.visit_document(doc);

        std::mem::take(&mut self.warnings)
    }

    fn check_node(&mut self, node: &Node) {
        if !self.registry.is_known_kind(&node.kind) {
            self.warnings.push(
                ValidationWarning::error(format!("Unknown block type '{}'", node.kind))
                    .with_node_id(node.id.clone()),
            );
        }

        if node.id.is_empty() {
            self.warnings.push(ValidationWarning::error(format!(
                "{} block has an empty id",
                node.kind
            )));
        } else if !self.seen_ids.insert(node.id.clone()) {
            // Selection and locking address blocks by id
            self.warnings.push(
                ValidationWarning::warning(format!("Duplicate id '{}'", node.id))
                    .with_node_id(node.id.clone()),
            );
        }

        if node.key.is_empty() {
            self.warnings.push(
                ValidationWarning::error(format!("{} block has an empty key", node.kind))
                    .with_node_id(node.id.clone()),
            );
        }
    }

    fn check_sibling_keys(&mut self, owner: ListOwner<'_>, nodes: &[Node]) {
        let mut keys = HashSet::new();
        for node in nodes {
            if !node.key.is_empty() && !keys.insert(node.key.as_str()) {
                self.warnings.push(
                    ValidationWarning::warning(format!(
                        "Duplicate key '{}' in {}",
                        node.key,
                        describe(owner)
                    ))
                    .with_node_id(node.id.clone()),
                );
            }
        }
    }
}

impl<'r, R: TypeRegistry + ?Sized> Visitor for Validator<'r, R> {
    fn visit_root(&mut self, root: &Root) {
        if root.id.is_empty() {
            self.warnings.push(ValidationWarning::error("Root has an empty id"));
        }
        walk_root(self, root);
    }

    fn visit_list(&mut self, owner: ListOwner<'_>, nodes: &[Node]) {
        self.check_sibling_keys(owner, nodes);
        walk_list(self, owner, nodes);
    }

    fn visit_node(&mut self, node: &Node) {
        self.check_node(node);
        walk_node(self, node);
    }
}

fn describe(owner: ListOwner<'_>) -> String {
    match owner {
        ListOwner::Content => "content".to_string(),
        ListOwner::Zone(name) => format!("zone '{}'", name),
        ListOwner::Slot { parent, name } => format!("slot '{}' of '{}'", name, parent.id),
        ListOwner::RootSlot { name } => format!("root slot '{}'", name),
    }
}

/// Validate `doc` against `registry`
pub fn validate<R: TypeRegistry + ?Sized>(doc: &Document, registry: &R) -> Vec<ValidationWarning> {
    Validator::new(registry).validate(doc)
}
