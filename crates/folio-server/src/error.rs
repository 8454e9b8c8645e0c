//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_site::{IndexError, NotFoundMessage};
use serde_json::json;

/// Path of the index endpoint, linked from not-found responses.
pub(crate) const INDEX_ROUTE: &str = "/api/index";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Document missing, unreadable, or addressed by a malformed slug.
    #[error("Document not found: {slug}")]
    DocumentNotFound {
        /// Requested slug.
        slug: String,
        /// Localized text for the response body.
        message: NotFoundMessage,
    },

    /// The documentation index could not be loaded.
    #[error("Documentation index unavailable: {0}")]
    IndexUnavailable(#[from] IndexError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::DocumentNotFound { slug, message } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Document not found",
                    "slug": slug,
                    "message": message.message,
                    "indexLink": {
                        "label": message.index_link_label,
                        "href": INDEX_ROUTE,
                    },
                }),
            ),
            Self::IndexUnavailable(e) => (
                StatusCode::BAD_GATEWAY,
                json!({"error": "Documentation index unavailable", "message": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use folio_site::Language;

    use super::*;

    #[test]
    fn test_not_found_status() {
        let error = ServerError::DocumentNotFound {
            slug: "missing".to_owned(),
            message: NotFoundMessage::for_language(Language::En),
        };
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_index_unavailable_status() {
        let error = ServerError::IndexUnavailable(IndexError::DuplicateSlug("welcome".to_owned()));
        assert_eq!(error.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
