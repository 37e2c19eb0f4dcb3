pub mod check;
pub mod convert;
pub mod diff;
pub mod init;
pub mod normalize;

pub use check::{check, CheckArgs};
pub use convert::{from_html, to_html, FromHtmlArgs, ToHtmlArgs};
pub use diff::{diff, DiffArgs};
pub use init::{init, InitArgs};
pub use normalize::{normalize, NormalizeArgs};

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use pagetree_ast::Document;
use pagetree_common::ComponentRegistry;
use pagetree_compiler_html::load_stored_with;
use pagetree_engine::{NormalizeOptions, Normalizer, WalkOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Loads page files with the configured registry and options
pub struct PageLoader {
    registry: ComponentRegistry,
    options: NormalizeOptions,
}

impl PageLoader {
    pub fn from_config(config: &Config) -> Self {
        Self {
            registry: config.registry(),
            options: config.normalize_options(),
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn normalizer(&self) -> Normalizer<'_, ComponentRegistry> {
        Normalizer::new(&self.registry).with_options(self.options.clone())
    }

    /// Walk depth matching the normalizer's slot ceiling
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions::from(&self.options)
    }

    /// Read a stored page (tree JSON or legacy HTML) and normalize it
    pub fn load(&self, path: &Path) -> Result<Document> {
        let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let doc = load_stored_with(&raw, &self.normalizer());
        debug!(path = %path.display(), nodes = doc.node_count(), "Loaded page");
        Ok(doc)
    }
}

/// Suffix of files written by `normalize`
pub const NORMALIZED_SUFFIX: &str = ".normalized";

/// Collect the page files named by `input`: the file itself, or every
/// `.json` file below a directory that is not already normalized output
pub fn find_page_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        let is_output = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|stem| stem.ends_with(NORMALIZED_SUFFIX))
            .unwrap_or(false);

        if path.is_file() && is_json && !is_output {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
