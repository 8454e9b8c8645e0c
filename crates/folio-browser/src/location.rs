//! Location parsing for both deployment variants.
//!
//! The standalone page router is addressed by hash fragments
//! (`#docs`, `#docs/<slug>`); the embedded component by routed paths
//! (`/app/docs`, `/app/docs/<slug>`). Both map onto the same [`DocRoute`].

use serde::Deserialize;

/// Deployment variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Standalone page router addressed by hash fragments.
    #[default]
    Standalone,
    /// Component embedded in an application shell, addressed by routed paths.
    Embedded,
}

/// What a location addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocRoute {
    /// Outside the documentation area.
    Other,
    /// Documentation index.
    Index,
    /// A specific document.
    Document(String),
}

impl DocRoute {
    /// Whether the route is inside the documentation area.
    #[must_use]
    pub fn is_docs(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Slug of a document route.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Document(slug) => Some(slug),
            _ => None,
        }
    }
}

/// How locations are spelled for a deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationScheme {
    /// `#<prefix>` and `#<prefix>/<slug>`.
    Hash {
        /// Fragment prefix without `#` (e.g., "docs").
        prefix: String,
    },
    /// `<base>` and `<base>/<slug>`.
    Route {
        /// Route base with leading slash and no trailing slash (e.g., "/app/docs").
        base: String,
    },
}

impl LocationScheme {
    /// Hash-fragment scheme with the given prefix.
    #[must_use]
    pub fn hash(prefix: &str) -> Self {
        Self::Hash {
            prefix: prefix.trim_start_matches('#').trim_matches('/').to_owned(),
        }
    }

    /// Routed-path scheme with the given base.
    #[must_use]
    pub fn route(base: &str) -> Self {
        let trimmed = base.trim_matches('/');
        Self::Route {
            base: format!("/{trimmed}"),
        }
    }

    /// Deployment variant the scheme belongs to.
    #[must_use]
    pub fn variant(&self) -> Variant {
        match self {
            Self::Hash { .. } => Variant::Standalone,
            Self::Route { .. } => Variant::Embedded,
        }
    }

    /// Parse a location.
    ///
    /// A leading `#` is optional for hash locations. Query strings and
    /// fragments are ignored for routed locations. A slug segment that
    /// itself contains `/` does not address a document.
    #[must_use]
    pub fn parse(&self, location: &str) -> DocRoute {
        match self {
            Self::Hash { prefix } => {
                let fragment = location.strip_prefix('#').unwrap_or(location);
                match fragment.strip_prefix(prefix.as_str()) {
                    Some(rest) => route_from_rest(rest),
                    None => DocRoute::Other,
                }
            }
            Self::Route { base } => {
                let path = location
                    .split(['?', '#'])
                    .next()
                    .unwrap_or_default();
                match path.strip_prefix(base.as_str()) {
                    Some(rest) => route_from_rest(rest),
                    None => DocRoute::Other,
                }
            }
        }
    }

    /// Location addressing the index (`None`) or a document.
    #[must_use]
    pub fn location_for(&self, slug: Option<&str>) -> String {
        let root = match self {
            Self::Hash { prefix } => format!("#{prefix}"),
            Self::Route { base } => base.clone(),
        };
        match slug {
            Some(slug) => format!("{root}/{slug}"),
            None => root,
        }
    }
}

/// Interpret what follows the prefix or base.
fn route_from_rest(rest: &str) -> DocRoute {
    if rest.is_empty() {
        return DocRoute::Index;
    }
    let Some(slug) = rest.strip_prefix('/') else {
        // "#docsfoo" or "/app/docsfoo"
        return DocRoute::Other;
    };
    let slug = slug.strip_suffix('/').unwrap_or(slug);
    if slug.is_empty() {
        DocRoute::Index
    } else if slug.contains('/') {
        DocRoute::Other
    } else {
        DocRoute::Document(slug.to_owned())
    }
}
