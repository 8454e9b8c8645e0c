//! Document API endpoint.
//!
//! Renders one document and returns its HTML together with index metadata,
//! table of contents, and previous/next links.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use folio_renderer::TocEntry;
use folio_site::{DocItem, DocPage};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/docs/{slug}.
#[derive(Debug, Serialize)]
pub(crate) struct DocResponse {
    /// Document slug.
    slug: String,
    /// Title from the index entry, else the first heading, else empty.
    title: String,
    /// Description from the index entry (empty if unlisted).
    description: String,
    /// Rendered HTML.
    content: String,
    /// Table of contents entries.
    toc: Vec<TocEntry>,
    /// Previous document in reading order.
    prev: Option<NavLink>,
    /// Next document in reading order.
    next: Option<NavLink>,
}

/// Link to a neighbouring document.
#[derive(Debug, Serialize)]
pub(crate) struct NavLink {
    slug: String,
    title: String,
}

impl From<DocItem> for NavLink {
    fn from(item: DocItem) -> Self {
        Self {
            slug: item.slug,
            title: item.title,
        }
    }
}

impl From<DocPage> for DocResponse {
    fn from(page: DocPage) -> Self {
        let (title, description) = match page.item {
            Some(item) => (item.title, item.description),
            None => (page.content.title.unwrap_or_default(), String::new()),
        };

        Self {
            slug: page.slug,
            title,
            description,
            content: page.content.html,
            toc: page.content.toc,
            prev: page.adjacent.prev.map(NavLink::from),
            next: page.adjacent.next.map(NavLink::from),
        }
    }
}

/// Handle GET /api/docs/{slug}.
pub(crate) async fn get_doc(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DocResponse>, ServerError> {
    let page = state
        .site
        .page(&slug)
        .await
        .map_err(|_| ServerError::DocumentNotFound {
            slug: slug.clone(),
            message: state.site.not_found_message(),
        })?;

    Ok(Json(DocResponse::from(page)))
}

#[cfg(test)]
mod tests {
    use folio_renderer::RenderedContent;
    use folio_site::Adjacent;

    use super::*;

    fn item(slug: &str, title: &str) -> DocItem {
        DocItem {
            slug: slug.to_owned(),
            title: title.to_owned(),
            description: format!("About {slug}"),
        }
    }

    #[test]
    fn test_response_prefers_index_title() {
        let page = DocPage {
            slug: "install".to_owned(),
            item: Some(item("install", "Install")),
            content: RenderedContent {
                html: "<h1>Installing</h1>".to_owned(),
                title: Some("Installing".to_owned()),
                ..RenderedContent::default()
            },
            adjacent: Adjacent {
                prev: Some(item("welcome", "Welcome")),
                next: None,
            },
        };

        let json = serde_json::to_value(DocResponse::from(page)).unwrap();

        assert_eq!(json["title"], "Install");
        assert_eq!(json["description"], "About install");
        assert_eq!(json["prev"]["slug"], "welcome");
        assert_eq!(json["prev"]["title"], "Welcome");
        assert!(json["next"].is_null());
    }

    #[test]
    fn test_response_falls_back_to_heading_title() {
        let page = DocPage {
            slug: "extra".to_owned(),
            item: None,
            content: RenderedContent {
                title: Some("Extra".to_owned()),
                ..RenderedContent::default()
            },
            adjacent: Adjacent::default(),
        };

        let json = serde_json::to_value(DocResponse::from(page)).unwrap();

        assert_eq!(json["title"], "Extra");
        assert_eq!(json["description"], "");
    }
}
