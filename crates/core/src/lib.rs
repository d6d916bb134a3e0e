//! Front matter extraction and content directory traversal for markdown sites.
//!
//! A content file is a `---` delimited header followed by a markdown body.
//! [`compile`] turns one file into a [`Page`] with its metadata, a table of
//! contents and a reading time estimate; [`traverse`] does the same for every
//! accepted file under a directory, handing each one to an optional hydrate
//! callback along with its breadcrumb and siblings.
//!
//! ```no_run
//! use mdshelf_core::{Depth, TraverseOptions, traverse_with};
//!
//! let options = TraverseOptions::new("content/posts").depth(Depth::Limited(1));
//! let titled = traverse_with(&options, |chunk| {
//!     chunk.metadata.contains_key("title").then(|| chunk.into_page())
//! });
//! for page in &titled {
//!     println!("{:?}: {} chars", page.metadata.get_str("title"), page.content.len());
//! }
//! ```

pub mod compile;
pub mod config;
pub mod frontmatter;
pub mod logging;
pub mod markdown;
pub mod options;
pub mod shelf;

pub use compile::{
    Breadcrumb, CompileError, HydrateChunk, Page, Record, Source, compile, compile_source,
    compile_with,
};
pub use frontmatter::{DateRef, Frontmatter};
pub use markdown::{ComrakRenderer, PlainRenderer, Renderer, TocNode};
pub use options::{Depth, Exclude, FileOptions, OptionsError, SortMode, TraverseOptions};
pub use shelf::{
    CancelToken, FileEntry, Shelf, ShelfFile, Siblings, traverse, traverse_sorted, traverse_with,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
