//! View routing and link interception for the documentation browser.
//!
//! The browser has three views: the documentation index, a single document,
//! and "somewhere else". Which one is visible is decided by the host's
//! current location, read through a [`LocationScheme`]:
//!
//! | Variant    | Index       | Document           |
//! |------------|-------------|--------------------|
//! | Standalone | `#docs`     | `#docs/<slug>`     |
//! | Embedded   | `/app/docs` | `/app/docs/<slug>` |
//!
//! [`ViewRouter`] publishes a [`ViewState`] for every location change and
//! guarantees that results of superseded navigations are dropped.
//! [`LinkInterceptor`] turns clicks on relative links inside rendered
//! documents into [`NavigationIntent`]s for the router.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use folio_browser::{LocationScheme, ViewRouter};
//! use folio_site::{Site, SiteConfig};
//! use folio_source::FsSource;
//!
//! # async fn example() {
//! let site = Site::new(Arc::new(FsSource::new("public")), SiteConfig::default());
//! let router = ViewRouter::new(Arc::new(site), LocationScheme::hash("docs"));
//!
//! router.navigate("#docs/install");
//! let state = router.settled().await;
//! println!("{}", state.navigation.title);
//! # }
//! ```

mod links;
mod location;
mod router;
mod state;

pub use links::{ClickOutcome, LinkClick, LinkInterceptor, NavigationIntent};
pub use location::{DocRoute, LocationScheme, Variant};
pub use router::{RouterEvent, ViewRouter};
pub use state::{NavigationState, View, ViewState};
