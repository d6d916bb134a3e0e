//! Body processing: placeholder injection, derived metadata and rendering.

pub mod inject;
pub mod read_time;
pub mod render;
pub mod toc;

pub use inject::{flatten, inject};
pub use read_time::{ReadTimeOptions, estimate, estimate_with};
pub use render::{ComrakRenderer, PlainRenderer, Renderer};
pub use toc::{Slugger, TocNode, table, table_with};
