//! Document fetching and conversion.

use std::sync::Arc;

use folio_renderer::{MarkupConverter, RenderedContent};
use folio_source::{Source, SourceError};

use crate::slug::is_valid_slug;

/// Error returned when a document cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The document does not exist or could not be fetched.
    #[error("Document not found: {slug}")]
    NotFound {
        /// Requested slug.
        slug: String,
        /// Fetch failure, absent when the slug was rejected before fetching.
        #[source]
        source: Option<SourceError>,
    },
}

impl RenderError {
    fn not_found(slug: &str, source: Option<SourceError>) -> Self {
        Self::NotFound {
            slug: slug.to_owned(),
            source,
        }
    }
}

/// Fetches a document by slug and converts it to HTML.
///
/// The resource path is `<docs_dir>/<slug>.<extension>`. Slugs that fail
/// [`is_valid_slug`] are reported as not found without a fetch, so a slug
/// never contributes anything but `[a-z0-9-]` to a resource path.
pub struct DocRenderer {
    source: Arc<dyn Source>,
    converter: Arc<dyn MarkupConverter>,
    docs_dir: String,
    extension: String,
}

impl DocRenderer {
    /// Create a renderer reading `docs/<slug>.md`.
    #[must_use]
    pub fn new(source: Arc<dyn Source>, converter: Arc<dyn MarkupConverter>) -> Self {
        Self {
            source,
            converter,
            docs_dir: "docs".to_owned(),
            extension: "md".to_owned(),
        }
    }

    /// Set the directory holding the markup files (empty for the source root).
    #[must_use]
    pub fn with_docs_dir(mut self, docs_dir: impl Into<String>) -> Self {
        self.docs_dir = docs_dir.into().trim_matches('/').to_owned();
        self
    }

    /// Set the markup file extension (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_owned();
        self
    }

    /// Resource path for a slug.
    #[must_use]
    pub fn resource_path(&self, slug: &str) -> String {
        if self.docs_dir.is_empty() {
            format!("{slug}.{}", self.extension)
        } else {
            format!("{}/{slug}.{}", self.docs_dir, self.extension)
        }
    }

    /// Fetch and convert the document for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] if the slug is malformed or the
    /// fetch fails for any reason. There is no retry.
    pub async fn render(&self, slug: &str) -> Result<RenderedContent, RenderError> {
        if !is_valid_slug(slug) {
            tracing::debug!(slug, "Rejected malformed slug");
            return Err(RenderError::not_found(slug, None));
        }

        let path = self.resource_path(slug);
        let markup = match self.source.fetch(&path).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!(slug, error = %e, "Failed to fetch document");
                return Err(RenderError::not_found(slug, Some(e)));
            }
        };

        Ok(self.converter.convert(&markup))
    }
}

#[cfg(test)]
mod tests {
    use folio_renderer::CmarkConverter;
    use folio_source::MockSource;

    use super::*;

    fn renderer(source: &Arc<MockSource>) -> DocRenderer {
        DocRenderer::new(
            Arc::clone(source) as Arc<dyn Source>,
            Arc::new(CmarkConverter::new()),
        )
    }

    #[test]
    fn test_resource_path() {
        let source = Arc::new(MockSource::new());
        assert_eq!(renderer(&source).resource_path("install"), "docs/install.md");
        assert_eq!(
            renderer(&source)
                .with_docs_dir("/content/pages/")
                .with_extension(".markdown")
                .resource_path("install"),
            "content/pages/install.markdown"
        );
        assert_eq!(
            renderer(&source).with_docs_dir("").resource_path("install"),
            "install.md"
        );
    }

    #[tokio::test]
    async fn test_render_existing_document() {
        let source = Arc::new(
            MockSource::new().with_resource("docs/install.md", "# Install\n\nRun it."),
        );
        let content = renderer(&source).render("install").await.unwrap();

        assert_eq!(content.title.as_deref(), Some("Install"));
        assert!(content.html.contains("<p>Run it.</p>"));
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let source = Arc::new(MockSource::new());
        let err = renderer(&source).render("install").await.unwrap_err();

        let RenderError::NotFound { slug, source: cause } = err;
        assert_eq!(slug, "install");
        assert!(cause.is_some());
    }

    #[tokio::test]
    async fn test_server_error_is_not_found() {
        let source = Arc::new(MockSource::new().with_status("docs/install.md", 500));
        let result = renderer(&source).render("install").await;
        assert!(matches!(result, Err(RenderError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_malformed_slug_is_not_fetched() {
        let source = Arc::new(MockSource::new());
        let result = renderer(&source).render("../index").await;

        assert!(matches!(
            result,
            Err(RenderError::NotFound { source: None, .. })
        ));
        assert_eq!(source.total_fetches(), 0);
    }
}
