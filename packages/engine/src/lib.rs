//! # Page Tree Engine
//!
//! Normalization, identity and whole-tree rewriting for the page builder's
//! content documents.
//!
//! ```text
//! raw JSON (storage / draft / editor)
//!        ↓  normalize      registry decides which block types survive
//! Document                 every node typed, identified and keyed
//!        ↓  walk / rekey   bulk rewrites over content, zones and slots
//! rendering surface
//! ```
//!
//! The registry is always passed in explicitly:
//!
//! ```rust,ignore
//! use pagetree_common::ComponentRegistry;
//! use pagetree_engine::{normalize, rekey_document};
//!
//! let registry = ComponentRegistry::with_builtins();
//! let doc = rekey_document(normalize(&raw, &registry));
//! ```

pub mod differ;
pub mod identity;
pub mod normalizer;
pub mod rekey;
pub mod validator;
pub mod walker;

#[cfg(test)]
mod tests_normalizer;

#[cfg(test)]
mod tests_properties;

pub use differ::{diff_documents, diff_list, ListPath, TreePatch};
pub use identity::{ensure_string_id, generate_safe_id, IdGenerator};
pub use normalizer::{is_truthy, normalize, FallbackNode, NormalizeOptions, Normalizer, DEFAULT_MAX_DEPTH};
pub use rekey::{rekey, rekey_document, rekey_document_with, rekey_with};
pub use validator::{validate, ValidationLevel, ValidationWarning, Validator};
pub use walker::{map_lists, map_lists_with_options, walk, walk_nodes, walk_with_options, WalkOptions};

// Re-export the model for convenience
pub use pagetree_ast::{BlockKind, Document, Node, PropValue, Props, Root};
pub use pagetree_common::{ComponentRegistry, TypeRegistry};
