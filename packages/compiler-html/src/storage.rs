use crate::compiler::{document_to_html, html_to_document, is_tree_document};
use pagetree_ast::Document;
use pagetree_common::TypeRegistry;
use pagetree_engine::Normalizer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when serializing a page for storage
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// How a page's content field is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// Normalized tree as JSON
    #[default]
    Json,
    /// Flattened legacy content
    Html,
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageFormat::Json => write!(f, "json"),
            StorageFormat::Html => write!(f, "html"),
        }
    }
}

impl FromStr for StorageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(StorageFormat::Json),
            "html" => Ok(StorageFormat::Html),
            other => Err(format!("Unknown storage format: {}. Use: json or html", other)),
        }
    }
}

/// Load a stored content field, which may hold tree JSON or legacy HTML.
///
/// Tree documents (see [`is_tree_document`]) are normalized. Other JSON
/// objects are partial drafts saved before any block was added, e.g. only
/// `root` props; they are normalized too so their root and zones survive.
/// A JSON string is unwrapped and treated as HTML, and anything else,
/// including text that is not JSON at all, is taken as HTML verbatim.
pub fn load_stored<R: TypeRegistry + ?Sized>(raw: &str, registry: &R) -> Document {
    load_stored_with(raw, &Normalizer::new(registry))
}

/// [`load_stored`] with a configured normalizer
pub fn load_stored_with<R: TypeRegistry + ?Sized>(raw: &str, normalizer: &Normalizer<'_, R>) -> Document {
    if raw.trim().is_empty() {
        return Document::default();
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(value) if is_tree_document(&value) => {
            debug!("Loading stored tree document");
            normalizer.normalize(&value)
        }
        Ok(value @ Value::Object(_)) => {
            debug!("Loading stored partial draft");
            normalizer.normalize(&value)
        }
        Ok(Value::String(html)) => {
            debug!("Loading stored content from JSON string");
            html_to_document(&html)
        }
        _ => {
            debug!("Loading stored content as legacy HTML");
            html_to_document(raw)
        }
    }
}

/// Serialize a document for a content field of the given format
pub fn save_stored(doc: &Document, format: StorageFormat) -> Result<String, BridgeError> {
    match format {
        StorageFormat::Json => Ok(serde_json::to_string(doc)?),
        StorageFormat::Html => Ok(document_to_html(doc)),
    }
}
