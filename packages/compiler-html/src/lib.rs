//! Bridge between page trees and the flat HTML/text content stored by
//! pages that predate the page builder.

mod compiler;
mod storage;


pub use compiler::{document_to_html, html_to_document, is_tree_document, PARAGRAPH_SEPARATOR};
pub use storage::{load_stored, load_stored_with, save_stored, BridgeError, StorageFormat};
