//! Markdown to HTML conversion for the Folio documentation browser.
//!
//! The browser treats markup conversion as a black box: Markdown text goes
//! in, HTML plus a little structural metadata comes out. [`MarkupConverter`]
//! is that seam and [`CmarkConverter`] is the `pulldown-cmark` backed
//! implementation.
//!
//! Besides the HTML, a conversion reports:
//! - the title (first H1 heading)
//! - a table of contents built from H2-H6 headings, with stable anchor ids
//! - every link destination, in document order
//!
//! # Example
//!
//! ```
//! use folio_renderer::{CmarkConverter, MarkupConverter};
//!
//! let content = CmarkConverter::new().convert("# Hello\n\n## Setup\n\nSee [install](install.md).");
//! assert_eq!(content.title.as_deref(), Some("Hello"));
//! assert_eq!(content.toc[0].id, "setup");
//! assert_eq!(content.links, vec!["install.md".to_owned()]);
//! ```

mod converter;
mod toc;
mod util;

pub use converter::{CmarkConverter, MarkupConverter, RenderedContent};
pub use toc::TocEntry;
pub use util::heading_anchor;
