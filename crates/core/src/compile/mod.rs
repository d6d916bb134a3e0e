//! Single-file pipeline.
//!
//! A file is split into front matter and body, placeholders are injected,
//! derived metadata is attached and the result goes through an optional
//! hydrate callback before the body is rendered.

pub mod types;

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use serde_yaml::{Number, Value};
use thiserror::Error;
use tracing::debug;

use crate::frontmatter::{self, ParsedDocument};
use crate::markdown::{inject, read_time, toc};
use crate::options::FileOptions;
use crate::shelf::Siblings;

pub use types::{Breadcrumb, HydrateChunk, Page, Record};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("failed to read file {0}: {1}")]
    Read(String, #[source] io::Error),
}

/// Bytes and stats of one file, wherever they came from.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    pub path: &'a Path,
    pub buffer: &'a [u8],
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
    pub siblings: Siblings<'a>,
}

impl<'a> Source<'a> {
    /// A buffer with no file stats and no siblings.
    pub fn new(path: &'a Path, buffer: &'a [u8]) -> Self {
        Self { path, buffer, created: None, modified: None, siblings: Siblings::empty() }
    }
}

/// Compile one file into a [`Page`].
pub fn compile(path: impl AsRef<Path>, options: &FileOptions) -> Result<Page, CompileError> {
    compile_with(path, options, |chunk| Some(chunk.into_page())).map(Option::unwrap_or_default)
}

/// Compile one file through `hydrate`; `Ok(None)` when the callback rejects it.
pub fn compile_with<R, F>(
    path: impl AsRef<Path>,
    options: &FileOptions,
    hydrate: F,
) -> Result<Option<R>, CompileError>
where
    R: Record,
    F: FnOnce(HydrateChunk<'_>) -> Option<R>,
{
    let path = path.as_ref();
    let buffer = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CompileError::NotFound(path.display().to_string()),
        _ => CompileError::Read(path.display().to_string(), e),
    })?;
    let meta = fs::metadata(path).ok();

    let source = Source {
        created: meta.as_ref().and_then(|m| m.created().ok()),
        modified: meta.as_ref().and_then(|m| m.modified().ok()),
        ..Source::new(path, &buffer)
    };
    Ok(compile_source(source, options, hydrate))
}

/// Run the pipeline on an in-memory source.
pub fn compile_source<'a, R, F>(source: Source<'a>, options: &FileOptions, hydrate: F) -> Option<R>
where
    R: Record,
    F: FnOnce(HydrateChunk<'a>) -> Option<R>,
{
    let text = String::from_utf8_lossy(source.buffer);
    let ParsedDocument { frontmatter, body } = frontmatter::parse(text.trim());
    let mut metadata = frontmatter.unwrap_or_default();
    let body = inject(body.trim(), &metadata);

    if !options.minimal {
        if !options.exclude.toc {
            metadata.insert("toc", toc::to_value(&toc::table(&body)));
        }
        if !options.exclude.read_time {
            let minutes = read_time::estimate(&body);
            metadata.insert("read_time", Value::Number(Number::from(minutes)));
        }
    }
    if !options.exclude.date {
        metadata.stamp_file_times(source.created, source.modified);
    }

    let chunk = HydrateChunk {
        breadcrumb: Breadcrumb::from_path(source.path),
        buffer: source.buffer,
        metadata,
        body,
        siblings: source.siblings,
    };
    let Some(mut record) = hydrate(chunk) else {
        debug!(path = %source.path.display(), "excluded by hydrate");
        return None;
    };

    if !options.minimal && !options.exclude.date {
        record.backfill_updated();
    }
    if !options.minimal
        && let Some(content) = record.content_mut()
    {
        *content = options.renderer.render(content);
    }
    Some(record)
}
