//! Documentation index model and session-scoped loader.
//!
//! The index is a small JSON document listing every documentation item,
//! grouped into sections:
//!
//! ```json
//! {
//!   "title": "Documentation",
//!   "sections": [
//!     { "title": "Basics", "items": [
//!       { "slug": "welcome", "title": "Welcome", "description": "Start here" }
//!     ]}
//!   ]
//! }
//! ```
//!
//! [`IndexLoader`] fetches it at most once per session and keeps the parsed
//! [`LoadedIndex`] (the index plus its derived [`KnownSlugs`]) for every
//! later caller.

use std::collections::HashSet;
use std::sync::Arc;

use folio_source::{Source, SourceError};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

/// Ordered catalog of documentation sections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocIndex {
    /// Index title.
    #[serde(default)]
    pub title: String,
    /// Sections in display order.
    pub sections: Vec<DocSection>,
}

/// Group of documentation items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSection {
    /// Section heading.
    pub title: String,
    /// Items in display order.
    pub items: Vec<DocItem>,
}

/// Single documentation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocItem {
    /// Identifier, unique across the whole index.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Short summary shown in listings.
    #[serde(default)]
    pub description: String,
}

/// Error returned when the index cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Index resource could not be fetched.
    #[error("Failed to fetch index: {0}")]
    Source(#[from] SourceError),
    /// Index resource is not valid index JSON.
    #[error("Malformed index: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two items share a slug.
    #[error("Duplicate slug in index: {0}")]
    DuplicateSlug(String),
}

impl DocIndex {
    /// Parse an index from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Parse`] for malformed JSON and
    /// [`IndexError::DuplicateSlug`] if a slug appears twice.
    pub fn from_json(text: &str) -> Result<Self, IndexError> {
        let index: Self = serde_json::from_str(text)?;

        let mut seen = HashSet::new();
        for item in index.items() {
            if !seen.insert(item.slug.as_str()) {
                return Err(IndexError::DuplicateSlug(item.slug.clone()));
            }
        }

        Ok(index)
    }

    /// All items across all sections, in section then item order.
    pub fn items(&self) -> impl Iterator<Item = &DocItem> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }

    /// Look up an item by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&DocItem> {
        self.items().find(|item| item.slug == slug)
    }
}

/// Set of every slug in a loaded index.
///
/// Only ever built from a [`DocIndex`]; there is no way to add or remove
/// slugs independently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnownSlugs(HashSet<String>);

impl KnownSlugs {
    /// Collect the slugs of `index`.
    #[must_use]
    pub fn from_index(index: &DocIndex) -> Self {
        Self(index.items().map(|item| item.slug.clone()).collect())
    }

    /// Whether `slug` names an item in the index.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains(slug)
    }

    /// Number of slugs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the index has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Index together with its derived slug set.
#[derive(Debug)]
pub struct LoadedIndex {
    index: DocIndex,
    known: KnownSlugs,
}

impl LoadedIndex {
    /// Derive the slug set and bundle it with `index`.
    #[must_use]
    pub fn new(index: DocIndex) -> Self {
        let known = KnownSlugs::from_index(&index);
        Self { index, known }
    }

    /// The index.
    #[must_use]
    pub fn index(&self) -> &DocIndex {
        &self.index
    }

    /// Slugs of all items in the index.
    #[must_use]
    pub fn known_slugs(&self) -> &KnownSlugs {
        &self.known
    }
}

/// Loads the documentation index once per session.
///
/// The first successful [`load`](Self::load) fetches and parses the index;
/// every later call returns the same `Arc` without touching the source.
/// Concurrent first calls wait on one another instead of racing. A failed
/// load leaves the cache empty, so the next call fetches again.
pub struct IndexLoader {
    source: Arc<dyn Source>,
    path: String,
    cell: OnceCell<Arc<LoadedIndex>>,
}

impl IndexLoader {
    /// Create a loader for the index resource at `path`.
    #[must_use]
    pub fn new(source: Arc<dyn Source>, path: impl Into<String>) -> Self {
        Self {
            source,
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Resource path of the index.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Return the cached index, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the fetch fails or the index is malformed.
    pub async fn load(&self) -> Result<Arc<LoadedIndex>, IndexError> {
        let loaded = self
            .cell
            .get_or_try_init(|| async {
                let text = self.source.fetch(&self.path).await?;
                let index = DocIndex::from_json(&text)?;
                let loaded = LoadedIndex::new(index);
                tracing::info!(
                    path = %self.path,
                    sections = loaded.index().sections.len(),
                    items = loaded.known_slugs().len(),
                    "Loaded documentation index"
                );
                Ok::<_, IndexError>(Arc::new(loaded))
            })
            .await?;

        Ok(Arc::clone(loaded))
    }

    /// The cached index, if it has been loaded.
    #[must_use]
    pub fn cached(&self) -> Option<Arc<LoadedIndex>> {
        self.cell.get().map(Arc::clone)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) const BASICS_JSON: &str = r#"{
        "title": "Documentation",
        "sections": [
            {"title": "Basics", "items": [
                {"slug": "welcome", "title": "Welcome", "description": "Start here"},
                {"slug": "install", "title": "Install", "description": "Get set up"}
            ]},
            {"title": "Guides", "items": [
                {"slug": "intro-basics", "title": "Intro", "description": "The basics"},
                {"slug": "deploy", "title": "Deploy"}
            ]}
        ]
    }"#;

    pub(crate) fn basics_index() -> DocIndex {
        DocIndex::from_json(BASICS_JSON).unwrap()
    }
}
