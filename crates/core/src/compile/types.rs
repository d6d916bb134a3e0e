//! Values flowing through the single-file pipeline.

use std::path::{Component, Path};

use serde::Serialize;
use serde_yaml::Value;

use crate::frontmatter::{DateRef, Frontmatter};
use crate::shelf::Siblings;

/// Path segments of a file, nearest first.
///
/// `content/posts/hello.md` becomes `["hello.md", "posts", "content"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Breadcrumb(Vec<String>);

impl Breadcrumb {
    pub fn from_path(path: &Path) -> Self {
        let mut segments: Vec<String> = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect();
        segments.reverse();
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The file name itself.
    pub fn name(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Name of the directory holding the file.
    pub fn parent(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }
}

/// Everything the hydrate callback gets for one file.
#[derive(Debug)]
pub struct HydrateChunk<'a> {
    pub breadcrumb: Breadcrumb,
    /// Raw file bytes.
    pub buffer: &'a [u8],
    pub metadata: Frontmatter,
    /// Body with placeholders injected, not yet rendered.
    pub body: String,
    pub siblings: Siblings<'a>,
}

impl HydrateChunk<'_> {
    pub fn into_page(self) -> Page {
        Page { metadata: self.metadata, content: self.body }
    }
}

/// Default compilation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    #[serde(flatten)]
    pub metadata: Frontmatter,
    pub content: String,
}

/// A compilation result the pipeline can finish.
///
/// After hydration the pipeline defaults `date.updated` through
/// [`Record::backfill_updated`] and renders [`Record::content_mut`]. Traversal
/// sorts by [`Record::date`]. Every method has a no-op default.
pub trait Record {
    fn content_mut(&mut self) -> Option<&mut String> {
        None
    }

    fn date(&self) -> Option<DateRef<'_>> {
        None
    }

    fn backfill_updated(&mut self) {}
}

impl Record for Page {
    fn content_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.content)
    }

    fn date(&self) -> Option<DateRef<'_>> {
        self.metadata.date_ref()
    }

    fn backfill_updated(&mut self) {
        self.metadata.backfill_updated();
    }
}

/// Front matter used directly as a result; a string `content` field is rendered.
impl Record for Frontmatter {
    fn content_mut(&mut self) -> Option<&mut String> {
        match self.get_mut("content")? {
            Value::String(content) => Some(content),
            _ => None,
        }
    }

    fn date(&self) -> Option<DateRef<'_>> {
        self.date_ref()
    }

    fn backfill_updated(&mut self) {
        Frontmatter::backfill_updated(self);
    }
}
