//! Index API endpoint.
//!
//! Returns the documentation index as loaded from the source.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use folio_site::DocIndex;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/index.
pub(crate) async fn get_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DocIndex>, ServerError> {
    let loaded = state.site.index().await?;
    Ok(Json(loaded.index().clone()))
}
