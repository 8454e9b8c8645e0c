//! Resource sources for the Folio documentation browser.
//!
//! The browser only ever needs two kinds of resources: the JSON index and
//! one Markdown file per documentation slug. Both are addressed by a
//! relative, `/`-separated resource path (`index.json`, `docs/install.md`)
//! and fetched through the [`Source`] trait, so the rest of the workspace
//! never deals with files or URLs directly.
//!
//! # Backends
//!
//! - [`FsSource`]: reads resources below a root directory
//! - [`HttpSource`]: issues `GET` requests below a base URL
//! - [`MockSource`]: in-memory resources for tests (behind the `mock` feature)
//!
//! # Example
//!
//! ```ignore
//! use folio_source::{FsSource, Source};
//!
//! let source = FsSource::new("site");
//! let index = source.fetch("index.json").await?;
//! ```

mod fs;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use fs::FsSource;
pub use http::HttpSource;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{Source, SourceError, SourceErrorKind, validate_path};
