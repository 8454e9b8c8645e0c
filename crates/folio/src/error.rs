//! CLI error types.

use folio_config::ConfigError;
use folio_site::IndexError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Location is outside the documentation area: {0}")]
    OutsideDocs(String),
}
