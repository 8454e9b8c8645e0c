//! View and navigation state published by the router.

use std::sync::Arc;

use folio_renderer::RenderedContent;
use folio_site::{Adjacent, DocItem, LoadedIndex};

/// Which view is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// Not the documentation area.
    #[default]
    Other,
    /// Documentation index grouped by section.
    Index,
    /// A single document.
    Document,
}

/// Per-navigation document state.
///
/// `loading` and `error` are never set together, and neither is set while
/// `content` holds a rendered document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Current slug (`None` for the index view).
    pub slug: Option<String>,
    /// A document fetch is in flight.
    pub loading: bool,
    /// The document could not be loaded.
    pub error: bool,
    /// Rendered document.
    pub content: Option<RenderedContent>,
    /// Previous item in reading order.
    pub prev: Option<DocItem>,
    /// Next item in reading order.
    pub next: Option<DocItem>,
    /// Title from the index entry (empty if unknown).
    pub title: String,
    /// Description from the index entry (empty if unknown).
    pub description: String,
}

impl NavigationState {
    /// Fresh state for a document navigation.
    #[must_use]
    pub fn for_slug(slug: Option<&str>) -> Self {
        Self {
            slug: slug.map(ToOwned::to_owned),
            ..Self::default()
        }
    }

    /// Enter `loading`, taking title/description from the index entry.
    pub fn begin_loading(&mut self, item: Option<&DocItem>) {
        if let Some(item) = item {
            self.title.clone_from(&item.title);
            self.description.clone_from(&item.description);
        }
        self.loading = true;
        self.error = false;
        self.content = None;
    }

    /// Enter `rendered`.
    pub fn finish(&mut self, content: RenderedContent, adjacent: Adjacent) {
        self.loading = false;
        self.error = false;
        self.content = Some(content);
        self.prev = adjacent.prev;
        self.next = adjacent.next;
    }

    /// Enter `error`.
    pub fn fail(&mut self) {
        self.loading = false;
        self.error = true;
        self.content = None;
        self.prev = None;
        self.next = None;
    }

    /// Whether a document has been rendered.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.content.is_some()
    }
}

/// Everything a host needs to draw the browser.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    /// Visible view.
    pub view: View,
    /// Loaded index for the sidebar and index grid (absent if not loaded).
    pub index: Option<Arc<LoadedIndex>>,
    /// Document state.
    pub navigation: NavigationState,
    /// The current navigation has finished all of its work.
    pub settled: bool,
}
