//! In-content link interception.
//!
//! Rendered documents link to each other with plain relative hrefs
//! (`install`, `install.md`). A click on such a link should become an
//! internal navigation rather than a full page load. [`LinkInterceptor`]
//! decides which clicks qualify and, for those, dispatches a
//! [`NavigationIntent`] to whoever owns the router. It never touches the
//! location itself.

use std::sync::{Arc, LazyLock};

use folio_site::{LoadedIndex, is_valid_slug};
use regex::Regex;
use tokio::sync::mpsc;

use crate::location::Variant;

/// An explicit URI scheme at the start of an href.
static SCHEME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").expect("invalid scheme regex"));

/// A click inside rendered content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkClick {
    /// `href` of the nearest enclosing link element, if any.
    pub href: Option<String>,
}

impl LinkClick {
    /// Click on a link with the given href.
    #[must_use]
    pub fn on(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
        }
    }
}

/// What the host should do with a click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Let the default navigation proceed.
    Default,
    /// Default suppressed; internal navigation to this slug was dispatched.
    Navigate(String),
}

/// Request to navigate to a document, produced by intercepted clicks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationIntent {
    /// Target slug (valid and known).
    pub slug: String,
}

/// Classifies clicks on rendered content.
pub struct LinkInterceptor {
    variant: Variant,
    index: Arc<LoadedIndex>,
    extension: String,
    intents: mpsc::UnboundedSender<NavigationIntent>,
}

impl LinkInterceptor {
    /// Create an interceptor bound to a loaded index.
    #[must_use]
    pub fn new(
        variant: Variant,
        index: Arc<LoadedIndex>,
        intents: mpsc::UnboundedSender<NavigationIntent>,
    ) -> Self {
        Self {
            variant,
            index,
            extension: ".md".to_owned(),
            intents,
        }
    }

    /// Set the markup extension stripped from hrefs (default `md`).
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = format!(".{}", extension.trim_start_matches('.'));
        self
    }

    /// Decide what a click on `href` should do, without dispatching.
    ///
    /// Rules, in order:
    /// 1. no href: default
    /// 2. explicit scheme (`https:`, `mailto:`, any case): default
    /// 3. fragment (`#...`): default
    /// 4. `./...` in the standalone variant: default
    /// 5. strip the markup extension; navigate if the rest is a valid slug
    ///    present in the index, otherwise default
    #[must_use]
    pub fn classify(&self, href: Option<&str>) -> ClickOutcome {
        let Some(href) = href else {
            return ClickOutcome::Default;
        };

        if SCHEME_PATTERN.is_match(href) || href.starts_with('#') {
            return ClickOutcome::Default;
        }

        if self.variant == Variant::Standalone && href.starts_with("./") {
            return ClickOutcome::Default;
        }

        let candidate = href.strip_suffix(self.extension.as_str()).unwrap_or(href);
        if is_valid_slug(candidate) && self.index.known_slugs().contains(candidate) {
            ClickOutcome::Navigate(candidate.to_owned())
        } else {
            ClickOutcome::Default
        }
    }

    /// Handle a click: classify it and dispatch an intent when intercepted.
    ///
    /// Falls back to [`ClickOutcome::Default`] when nobody is listening for
    /// intents, so the click is never swallowed.
    pub fn on_click(&self, click: &LinkClick) -> ClickOutcome {
        let outcome = self.classify(click.href.as_deref());

        if let ClickOutcome::Navigate(slug) = &outcome {
            let intent = NavigationIntent { slug: slug.clone() };
            if self.intents.send(intent).is_err() {
                tracing::debug!(slug = %slug, "No navigation listener, using default");
                return ClickOutcome::Default;
            }
            tracing::debug!(slug = %slug, "Intercepted internal link");
        }

        outcome
    }
}
