//! Source trait and error types.
//!
//! # Resource Path Convention
//!
//! Every path handed to [`Source::fetch`] is a **resource path**:
//! - relative (no leading `/`)
//! - `/`-separated, never `\`
//! - free of `.` and `..` segments
//!
//! Backends map resource paths onto their own addressing (a file below a
//! root directory, a URL below a base URL) and must reject anything that
//! could escape that root. [`validate_path`] implements the shared check.

use async_trait::async_trait;

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Resource path is malformed or escapes the source root.
    InvalidPath,
    /// Backend answered with a non-success status other than "not found".
    Status(u16),
    /// Backend could not be reached (connection refused, timeout, DNS).
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Source error with semantic kind and backend-specific cause.
#[derive(Debug)]
pub struct SourceError {
    kind: SourceErrorKind,
    path: Option<String>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Create a new source error.
    #[must_use]
    pub fn new(kind: SourceErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Create a not found error for a resource path.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound).with_path(path)
    }

    /// Create an invalid path error for a resource path.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::InvalidPath).with_path(path)
    }

    /// Create a source error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => SourceErrorKind::NotFound,
            std::io::ErrorKind::TimedOut => SourceErrorKind::Unavailable,
            _ => SourceErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }

    /// Attach the resource path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    /// Resource path the error refers to, if known.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Backend that produced the error, if known.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Whether the resource simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == SourceErrorKind::NotFound
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: cause (path: docs/x.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        match self.kind {
            SourceErrorKind::NotFound => write!(f, "Not found")?,
            SourceErrorKind::InvalidPath => write!(f, "Invalid path")?,
            SourceErrorKind::Status(code) => write!(f, "Unexpected status {code}")?,
            SourceErrorKind::Unavailable => write!(f, "Unavailable")?,
            SourceErrorKind::Other => write!(f, "Error")?,
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }

        Ok(())
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Check that `path` is a well-formed resource path.
///
/// # Errors
///
/// Returns [`SourceErrorKind::InvalidPath`] for empty paths, absolute paths,
/// backslashes, empty segments, and `.`/`..` segments.
pub fn validate_path(path: &str) -> Result<(), SourceError> {
    let malformed = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if malformed {
        Err(SourceError::invalid_path(path))
    } else {
        Ok(())
    }
}

/// Asynchronous resource source.
///
/// Implementations must be cheap to share behind an `Arc`; the browser holds
/// one source for the whole session.
#[async_trait]
pub trait Source: Send + Sync {
    /// Fetch the full text of a resource.
    ///
    /// # Arguments
    ///
    /// * `path` - Resource path (e.g., "index.json", "docs/install.md")
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the resource is missing, the path is
    /// invalid, or the backend fails.
    async fn fetch(&self, path: &str) -> Result<String, SourceError>;
}
