//! Application state.

use std::sync::Arc;

use folio_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Documentation site (index cache plus renderer).
    pub(crate) site: Arc<Site>,
}
