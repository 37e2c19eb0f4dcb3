use pagetree_common::{CommonResult, ComponentRegistry};
use pagetree_compiler_html::StorageFormat;
use pagetree_engine::{NormalizeOptions, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagetree.config.json";

/// pagetree configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Block types registered on top of the built-ins
    #[serde(default)]
    pub custom_types: Vec<String>,

    /// Deepest slot nesting that is normalized and walked
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Format written by `normalize`
    #[serde(default)]
    pub storage: StorageFormat,

    /// Output directory for normalized files (next to the input if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> CommonResult<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Built-in blocks plus the configured custom types
    pub fn registry(&self) -> ComponentRegistry {
        let mut registry = ComponentRegistry::with_builtins();
        registry.extend(self.custom_types.iter().cloned());
        registry
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            max_depth: self.max_depth,
            ..NormalizeOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            custom_types: vec![],
            max_depth: default_max_depth(),
            storage: StorageFormat::default(),
            out_dir: None,
        }
    }
}
