//! Filesystem source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::source::{Source, SourceError, validate_path};

const BACKEND: &str = "Fs";

/// Source reading resources below a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl Source for FsSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        validate_path(path).map_err(|e| e.with_backend(BACKEND))?;

        let full_path = self.root.join(path);
        tracing::debug!(path = %full_path.display(), "Reading resource");

        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| SourceError::io(e, path).with_backend(BACKEND))
    }
}
