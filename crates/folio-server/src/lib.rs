//! HTTP preview server for the Folio documentation browser.
//!
//! Serves the documentation core as a JSON API:
//!
//! | Route                  | Response                                         |
//! |------------------------|--------------------------------------------------|
//! | `GET /api/index`       | the documentation index (502 if it cannot load)  |
//! | `GET /api/docs/{slug}` | rendered document with metadata and prev/next    |
//!
//! A document that cannot be loaded answers 404 with the localized
//! not-found message and a link back to the index.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use folio_server::{ServerConfig, run_server};
//! use folio_site::{Site, SiteConfig};
//! use folio_source::FsSource;
//!
//! #[tokio::main]
//! async fn main() {
//!     let site = Site::new(Arc::new(FsSource::new("public")), SiteConfig::default());
//!     run_server(Arc::new(site), ServerConfig::default()).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use folio_site::Site;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or serving fails.
pub async fn run_server(site: Arc<Site>, config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState { site });
    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
