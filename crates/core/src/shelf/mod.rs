//! Directory traversal and hydration.
//!
//! Each directory is read once into a [`Snapshot`]; accepted files are
//! compiled from it with the rest of the snapshot visible as [`Siblings`].
//! Subdirectories are entered depth first while the depth budget allows, and
//! the results are returned as one flat list.

pub mod cancel;
pub mod order;
pub mod snapshot;
pub mod walker;

use std::cmp::Ordering;

pub use cancel::CancelToken;
pub use order::{by_date, by_date_then, compare_dates};
pub use snapshot::{EntryKind, FileEntry, Siblings, Snapshot};
pub use walker::{Shelf, ShelfFile};

use crate::compile::{HydrateChunk, Page, Record};
use crate::options::TraverseOptions;

/// Compile every accepted file under `options.entry` into a [`Page`].
pub fn traverse(options: &TraverseOptions) -> Vec<Page> {
    traverse_with(options, |chunk| Some(chunk.into_page()))
}

/// Compile every accepted file through `hydrate`, dropping rejected files.
pub fn traverse_with<R, F>(options: &TraverseOptions, hydrate: F) -> Vec<R>
where
    R: Record,
    F: FnMut(HydrateChunk<'_>) -> Option<R>,
{
    Shelf::new(options.clone()).hydrate(hydrate)
}

/// Like [`traverse_with`], ordering results with `compare`.
pub fn traverse_sorted<R, F, C>(options: &TraverseOptions, hydrate: F, compare: C) -> Vec<R>
where
    R: Record,
    F: FnMut(HydrateChunk<'_>) -> Option<R>,
    C: FnMut(&R, &R) -> Ordering,
{
    Shelf::new(options.clone()).hydrate_sorted(hydrate, compare)
}
