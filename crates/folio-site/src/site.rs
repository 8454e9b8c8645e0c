//! Site facade combining index loading and document rendering.
//!
//! [`Site`] is what the browser and the preview server hold on to: one
//! index cache and one document renderer over a shared [`Source`].

use std::sync::Arc;

use folio_renderer::{CmarkConverter, MarkupConverter, RenderedContent};
use folio_source::Source;

use crate::document::{DocRenderer, RenderError};
use crate::index::{DocItem, IndexError, IndexLoader, LoadedIndex};
use crate::messages::{Language, NotFoundMessage};
use crate::navigation::{Adjacent, adjacent};

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Resource path of the index JSON.
    pub index_path: String,
    /// Directory holding the markup files.
    pub docs_dir: String,
    /// Markup file extension (without the dot).
    pub extension: String,
    /// Pass raw HTML in markup through instead of escaping it.
    pub allow_raw_html: bool,
    /// Language for user-facing messages.
    pub language: Language,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_path: "index.json".to_owned(),
            docs_dir: "docs".to_owned(),
            extension: "md".to_owned(),
            allow_raw_html: true,
            language: Language::default(),
        }
    }
}

/// A fully resolved documentation page.
#[derive(Clone, Debug)]
pub struct DocPage {
    /// Page slug.
    pub slug: String,
    /// Index entry for the slug, if the index lists it.
    pub item: Option<DocItem>,
    /// Converted content.
    pub content: RenderedContent,
    /// Previous/next items (empty when the index is unavailable).
    pub adjacent: Adjacent,
}

/// Index cache plus document renderer.
pub struct Site {
    loader: IndexLoader,
    renderer: DocRenderer,
    language: Language,
}

impl Site {
    /// Create a site over `source` using the `pulldown-cmark` converter.
    #[must_use]
    pub fn new(source: Arc<dyn Source>, config: SiteConfig) -> Self {
        let converter = CmarkConverter::new().with_raw_html(config.allow_raw_html);
        Self::with_converter(source, Arc::new(converter), config)
    }

    /// Create a site with a custom markup converter.
    #[must_use]
    pub fn with_converter(
        source: Arc<dyn Source>,
        converter: Arc<dyn MarkupConverter>,
        config: SiteConfig,
    ) -> Self {
        let loader = IndexLoader::new(Arc::clone(&source), config.index_path);
        let renderer = DocRenderer::new(source, converter)
            .with_docs_dir(config.docs_dir)
            .with_extension(config.extension);

        Self {
            loader,
            renderer,
            language: config.language,
        }
    }

    /// Load (or return the cached) documentation index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the index cannot be fetched or parsed.
    pub async fn index(&self) -> Result<Arc<LoadedIndex>, IndexError> {
        self.loader.load().await
    }

    /// The cached index, if already loaded.
    #[must_use]
    pub fn cached_index(&self) -> Option<Arc<LoadedIndex>> {
        self.loader.cached()
    }

    /// Fetch and convert one document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] if the document cannot be fetched.
    pub async fn render(&self, slug: &str) -> Result<RenderedContent, RenderError> {
        self.renderer.render(slug).await
    }

    /// Render a document and resolve its index entry and neighbours.
    ///
    /// An index that fails to load only leaves `item` and `adjacent` empty.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] if the document cannot be fetched.
    pub async fn page(&self, slug: &str) -> Result<DocPage, RenderError> {
        let index = match self.index().await {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, "Documentation index unavailable");
                None
            }
        };

        let content = self.render(slug).await?;

        let (item, adjacent) = match &index {
            Some(loaded) => (
                loaded.index().find(slug).cloned(),
                adjacent(loaded.index(), slug),
            ),
            None => (None, Adjacent::default()),
        };

        Ok(DocPage {
            slug: slug.to_owned(),
            item,
            content,
            adjacent,
        })
    }

    /// Not-found message in the configured language.
    #[must_use]
    pub fn not_found_message(&self) -> NotFoundMessage {
        NotFoundMessage::for_language(self.language)
    }

    /// Resource path of a document.
    #[must_use]
    pub fn resource_path(&self, slug: &str) -> String {
        self.renderer.resource_path(slug)
    }
}
