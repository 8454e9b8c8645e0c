//! Mock source implementation for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem or network
//! access. Per-path delays let tests reorder concurrent fetches.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use crate::source::{Source, SourceError, SourceErrorKind};

const BACKEND: &str = "Mock";

/// In-memory source for testing.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use folio_source::{MockSource, Source};
///
/// let source = MockSource::new()
///     .with_resource("docs/install.md", "# Install")
///     .with_delay("docs/install.md", Duration::from_millis(50));
///
/// let content = source.fetch("docs/install.md").await?;
/// assert_eq!(source.fetch_count("docs/install.md"), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    resources: RwLock<HashMap<String, String>>,
    statuses: RwLock<HashMap<String, u16>>,
    delays: RwLock<HashMap<String, Duration>>,
    fetches: RwLock<HashMap<String, usize>>,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_resource(self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.resources
            .write()
            .unwrap()
            .insert(path.into(), body.into());
        self
    }

    /// Make fetches of `path` fail with the given HTTP-like status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(self, path: impl Into<String>, status: u16) -> Self {
        self.statuses.write().unwrap().insert(path.into(), status);
        self
    }

    /// Delay every fetch of `path` by `delay`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_delay(self, path: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(path.into(), delay);
        self
    }

    /// Number of fetches issued for `path` so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn fetch_count(&self, path: &str) -> usize {
        self.fetches
            .read()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or_default()
    }

    /// Total number of fetches across all paths.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn total_fetches(&self) -> usize {
        self.fetches.read().unwrap().values().sum()
    }
}

#[async_trait]
impl Source for MockSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        *self
            .fetches
            .write()
            .unwrap()
            .entry(path.to_owned())
            .or_default() += 1;

        let delay = self.delays.read().unwrap().get(path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = self.statuses.read().unwrap().get(path).copied() {
            let kind = if status == 404 {
                SourceErrorKind::NotFound
            } else {
                SourceErrorKind::Status(status)
            };
            return Err(SourceError::new(kind)
                .with_path(path)
                .with_backend(BACKEND));
        }

        self.resources
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::not_found(path).with_backend(BACKEND))
    }
}
