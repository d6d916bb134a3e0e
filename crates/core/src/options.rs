//! Options for compiling single files and traversing directories.
//!
//! Everything is validated when the options are built, so the pipeline and
//! the walker never see an unknown exclusion key or a broken pattern.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::markdown::{ComrakRenderer, Renderer};

/// Files whose name starts with this prefix are never compiled.
pub const DRAFT_PREFIX: &str = "draft.";

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("unknown exclude key '{0}' (expected one of: toc, rt, date)")]
    UnknownExclude(String),

    #[error("invalid file pattern '{0}': {1}")]
    InvalidPattern(String, #[source] regex::Error),
}

/// Derived metadata to leave out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exclude {
    /// Skip `toc`.
    pub toc: bool,
    /// Skip `read_time`.
    pub read_time: bool,
    /// Skip file timestamps and the `date.updated` default.
    pub date: bool,
}

impl Exclude {
    /// Build from the string keys `toc`, `rt` (or `read_time`) and `date`.
    pub fn from_keys<I, S>(keys: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exclude = Self::default();
        for key in keys {
            match key.as_ref().trim() {
                "toc" => exclude.toc = true,
                "rt" | "read_time" => exclude.read_time = true,
                "date" => exclude.date = true,
                other => return Err(OptionsError::UnknownExclude(other.to_string())),
            }
        }
        Ok(exclude)
    }
}

/// Options for the single-file pipeline.
#[derive(Clone)]
pub struct FileOptions {
    /// Skip all derived metadata and rendering; the body is returned raw.
    pub minimal: bool,
    pub exclude: Exclude,
    pub renderer: Arc<dyn Renderer>,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self { minimal: false, exclude: Exclude::default(), renderer: Arc::new(ComrakRenderer) }
    }
}

impl fmt::Debug for FileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileOptions")
            .field("minimal", &self.minimal)
            .field("exclude", &self.exclude)
            .finish_non_exhaustive()
    }
}

impl FileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimal(mut self, value: bool) -> Self {
        self.minimal = value;
        self
    }

    pub fn exclude(mut self, exclude: Exclude) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }
}

/// How far below the root the walker descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Descend at most this many directory levels; `0` stays in the root.
    Limited(u32),
    Unlimited,
}

impl Default for Depth {
    fn default() -> Self {
        Self::Limited(0)
    }
}

impl Depth {
    /// Negative values mean unlimited.
    pub fn from_signed(depth: i64) -> Self {
        match u32::try_from(depth) {
            Ok(levels) => Self::Limited(levels),
            Err(_) if depth < 0 => Self::Unlimited,
            Err(_) => Self::Limited(u32::MAX),
        }
    }

    /// Budget for a subdirectory, or `None` when it must not be entered.
    pub fn descend(self) -> Option<Self> {
        match self {
            Self::Limited(0) => None,
            Self::Limited(levels) => Some(Self::Limited(levels - 1)),
            Self::Unlimited => Some(Self::Unlimited),
        }
    }
}

impl From<bool> for Depth {
    fn from(recurse: bool) -> Self {
        if recurse { Self::Unlimited } else { Self::Limited(0) }
    }
}

/// Ordering applied to traversal results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Directory listing order (file names, depth first).
    #[default]
    Listing,
    /// Newest first by `date`, listing order for ties.
    Date,
}

/// Options for walking a content directory.
#[derive(Debug, Clone)]
pub struct TraverseOptions {
    /// Root directory.
    pub entry: PathBuf,
    pub depth: Depth,
    /// Accepted file name suffixes, e.g. `.md`.
    pub extensions: Vec<String>,
    /// Additional accepted file name patterns.
    pub patterns: Vec<Regex>,
    pub file: FileOptions,
    pub sort: SortMode,
    /// Descend into symlinked directories.
    pub follow_links: bool,
}

impl TraverseOptions {
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            depth: Depth::default(),
            extensions: vec![".md".to_string()],
            patterns: Vec::new(),
            file: FileOptions::default(),
            sort: SortMode::default(),
            follow_links: false,
        }
    }

    pub fn depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    pub fn recurse(self, recurse: bool) -> Self {
        self.depth(Depth::from(recurse))
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Result<Self, OptionsError> {
        let regex = Regex::new(pattern)
            .map_err(|e| OptionsError::InvalidPattern(pattern.to_string(), e))?;
        self.patterns.push(regex);
        Ok(self)
    }

    pub fn file(mut self, file: FileOptions) -> Self {
        self.file = file;
        self
    }

    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn follow_links(mut self, value: bool) -> Self {
        self.follow_links = value;
        self
    }

    /// Whether a file with this name is compiled.
    pub fn accepts(&self, name: &str) -> bool {
        if name.starts_with(DRAFT_PREFIX) {
            return false;
        }
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
            || self.patterns.iter().any(|pattern| pattern.is_match(name))
    }
}
