//! Front matter splitting and parsing.
//!
//! This module provides functionality to:
//! - Split a document into its `---` delimited header and markdown body
//! - Parse the header's YAML-like subset into an ordered value tree
//! - Query and update common fields (`date` stamps)

pub mod construct;
pub mod parser;
pub mod types;

pub use construct::{coerce, construct};
pub use parser::{DELIMITER, Split, parse, split};
pub use types::{DateRef, Frontmatter, ParsedDocument, is_truthy};
