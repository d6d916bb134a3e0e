use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::options::{SortMode, TraverseOptions};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub content_root: String,
    /// Directory levels to descend; negative means unlimited. Wins over `recurse`.
    pub depth: Option<i64>,
    pub recurse: Option<bool>,
    /// Accepted file name suffixes (defaults to `.md`).
    pub extensions: Option<Vec<String>>,
    /// Extra accepted file name patterns (regular expressions).
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Derived metadata to skip: `toc`, `rt`, `date`.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub minimal: bool,
    #[serde(default)]
    pub sort: SortMode,
    #[serde(default)]
    pub follow_links: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub content_root: PathBuf,
    /// Validated traversal settings of the active profile.
    pub traverse: TraverseOptions,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    pub fn traverse_options(&self) -> TraverseOptions {
        self.traverse.clone()
    }
}
