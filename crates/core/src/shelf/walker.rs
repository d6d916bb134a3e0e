//! Depth-first traversal of a content directory.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::cancel::CancelToken;
use super::order;
use super::snapshot::{EntryKind, Snapshot};
use crate::compile::{HydrateChunk, Record, Source, compile_source};
use crate::options::{DRAFT_PREFIX, Depth, SortMode, TraverseOptions};

/// A file that would be compiled by [`Shelf::hydrate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfFile {
    pub path: PathBuf,
    pub name: String,
    /// Directory levels below the root; `0` for files in the root itself.
    pub depth: usize,
}

/// Reusable traversal engine.
#[derive(Debug, Clone)]
pub struct Shelf {
    options: TraverseOptions,
    cancel: CancelToken,
}

impl Shelf {
    pub fn new(options: TraverseOptions) -> Self {
        Self { options, cancel: CancelToken::default() }
    }

    /// Stop walking once `cancel` is triggered.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn options(&self) -> &TraverseOptions {
        &self.options
    }

    /// Compile every accepted file through `hydrate`.
    ///
    /// Results come back in listing order, or newest first with
    /// [`SortMode::Date`]. Files rejected by `hydrate` are dropped.
    pub fn hydrate<R, F>(&self, hydrate: F) -> Vec<R>
    where
        R: Record,
        F: FnMut(HydrateChunk<'_>) -> Option<R>,
    {
        let mut records = self.collect(hydrate);
        if self.options.sort == SortMode::Date {
            order::by_date(&mut records);
        }
        records
    }

    /// Like [`Shelf::hydrate`], ordering with `compare`.
    ///
    /// With [`SortMode::Date`] `compare` only decides between equal dates;
    /// otherwise it is the whole ordering.
    pub fn hydrate_sorted<R, F, C>(&self, hydrate: F, mut compare: C) -> Vec<R>
    where
        R: Record,
        F: FnMut(HydrateChunk<'_>) -> Option<R>,
        C: FnMut(&R, &R) -> Ordering,
    {
        let mut records = self.collect(hydrate);
        match self.options.sort {
            SortMode::Date => order::by_date_then(&mut records, compare),
            SortMode::Listing => records.sort_by(|a, b| compare(a, b)),
        }
        records
    }

    /// List the files [`Shelf::hydrate`] would compile, without reading them.
    pub fn scan(&self) -> Vec<ShelfFile> {
        let root = &self.options.entry;
        if !root.is_dir() {
            warn!(path = %root.display(), "content root does not exist, skipping");
            return Vec::new();
        }

        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.options.follow_links)
            .sort_by_file_name();
        if let Depth::Limited(levels) = self.options.depth {
            walker = walker.max_depth((levels as usize).saturating_add(1));
        }

        let mut files = Vec::new();
        for entry in walker {
            if self.cancel.is_cancelled() {
                debug!("scan cancelled");
                break;
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.options.accepts(&name) {
                continue;
            }
            files.push(ShelfFile { path: path.to_path_buf(), name, depth: entry.depth() - 1 });
        }
        files
    }

    fn collect<R, F>(&self, mut hydrate: F) -> Vec<R>
    where
        R: Record,
        F: FnMut(HydrateChunk<'_>) -> Option<R>,
    {
        let root = &self.options.entry;
        if !root.is_dir() {
            warn!(path = %root.display(), "content root does not exist, skipping");
            return Vec::new();
        }

        let mut walk = Walk { shelf: self, visited: HashSet::new(), records: Vec::new() };
        walk.visit(root, self.options.depth, &mut hydrate);
        walk.records
    }
}

struct Walk<'s, R> {
    shelf: &'s Shelf,
    visited: HashSet<PathBuf>,
    records: Vec<R>,
}

impl<R: Record> Walk<'_, R> {
    fn visit<F>(&mut self, dir: &Path, depth: Depth, hydrate: &mut F)
    where
        F: FnMut(HydrateChunk<'_>) -> Option<R>,
    {
        if self.shelf.cancel.is_cancelled() {
            debug!(path = %dir.display(), "walk cancelled");
            return;
        }

        match fs::canonicalize(dir) {
            Ok(canonical) => {
                if !self.visited.insert(canonical) {
                    debug!(path = %dir.display(), "directory already visited, skipping cycle");
                    return;
                }
            }
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        }

        let shelf = self.shelf;
        let options = &shelf.options;
        let snapshot = match Snapshot::read_with(dir, |name| options.accepts(name)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };

        for (index, entry) in snapshot.entries().iter().enumerate() {
            match entry.kind {
                EntryKind::Directory => {
                    if entry.symlink && !options.follow_links {
                        debug!(path = %entry.path.display(), "not following symlinked directory");
                        continue;
                    }
                    if let Some(next) = depth.descend() {
                        self.visit(&entry.path, next, hydrate);
                    }
                }
                EntryKind::File => {
                    if entry.name.starts_with(DRAFT_PREFIX) {
                        debug!(path = %entry.path.display(), "skipping draft");
                        continue;
                    }
                    if !options.accepts(&entry.name) {
                        continue;
                    }
                    let Some(buffer) = entry.buffer.as_deref() else {
                        continue;
                    };

                    let source = Source {
                        path: &entry.path,
                        buffer,
                        created: entry.created,
                        modified: entry.modified,
                        siblings: snapshot.siblings_of(index),
                    };
                    if let Some(record) = compile_source(source, &options.file, &mut *hydrate) {
                        self.records.push(record);
                    }
                }
            }
        }
    }
}
