//! Documentation index, slugs, navigation and document rendering.
//!
//! This crate holds everything the browser knows about documentation
//! content, independent of how it is presented:
//!
//! - [`DocIndex`] and the session-scoped [`IndexLoader`]
//! - [`is_valid_slug`] for deciding what counts as an internal identifier
//! - [`DocRenderer`] for fetching and converting one document
//! - [`adjacent`] for previous/next resolution
//! - [`Site`], which bundles the above over one [`folio_source::Source`]

mod document;
mod index;
mod messages;
mod navigation;
mod site;
mod slug;

pub use document::{DocRenderer, RenderError};
pub use index::{DocIndex, DocItem, DocSection, IndexError, IndexLoader, KnownSlugs, LoadedIndex};
pub use messages::{Language, NotFoundMessage};
pub use navigation::{Adjacent, adjacent};
pub use site::{DocPage, Site, SiteConfig};
pub use slug::is_valid_slug;
