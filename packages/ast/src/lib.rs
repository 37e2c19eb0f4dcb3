pub mod document;
pub mod kind;
pub mod node;

pub use document::{Document, Root, DEFAULT_PAGE_TITLE, ROOT_ID};
pub use kind::BlockKind;
pub use node::{is_node_shaped, is_slot_array, Node, PropValue, Props};
