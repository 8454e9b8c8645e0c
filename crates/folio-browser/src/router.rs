//! View router.
//!
//! [`ViewRouter`] turns location changes into [`ViewState`] updates:
//!
//! ```text
//! navigate(location)
//!     │ reset state, bump generation
//!     ├─► Other     ─► done
//!     ├─► Index     ─► load index ─► done
//!     └─► Document  ─► load index ─► loading ─► render ─► rendered | error
//! ```
//!
//! # Stale navigations
//!
//! Every navigation gets a generation number. State updates from a
//! navigation's task are applied inside the watch channel's lock and only if
//! the generation is still current, so a slow fetch from a superseded
//! navigation can never overwrite a newer one. The superseded task is also
//! aborted. After [`shutdown`](ViewRouter::shutdown) no update or event is
//! published at all.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use folio_site::{Site, adjacent};
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::links::{LinkInterceptor, NavigationIntent};
use crate::location::{DocRoute, LocationScheme};
use crate::state::{NavigationState, View, ViewState};

/// One-shot effects for the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouterEvent {
    /// The documentation area was entered; scroll the view to the top.
    ScrollToTop,
    /// The router navigated on its own (from an intercepted link); the host
    /// should reflect this location in its address bar.
    Navigated(String),
}

/// Capacity of the event channel.
const EVENT_CAPACITY: usize = 16;

struct Inner {
    site: Arc<Site>,
    scheme: LocationScheme,
    generation: AtomicU64,
    closed: AtomicBool,
    shutdown: Notify,
    state: watch::Sender<ViewState>,
    events: broadcast::Sender<RouterEvent>,
}

impl Inner {
    /// Apply `update` if `generation` is still current and the router is open.
    fn apply(&self, generation: u64, update: impl FnOnce(&mut ViewState)) -> bool {
        self.state.send_if_modified(|state| {
            if self.closed.load(Ordering::Acquire)
                || self.generation.load(Ordering::Acquire) != generation
            {
                return false;
            }
            update(state);
            true
        })
    }

    async fn load_index(self: Arc<Self>, generation: u64) {
        let index = match self.site.index().await {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, "Documentation index unavailable");
                None
            }
        };

        self.apply(generation, |state| {
            state.index = index;
            state.settled = true;
        });
    }

    async fn load_document(self: Arc<Self>, generation: u64, slug: String) {
        let index = match self.site.index().await {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, "Documentation index unavailable");
                None
            }
        };

        let current = self.apply(generation, |state| {
            let item = index.as_ref().and_then(|loaded| loaded.index().find(&slug));
            state.navigation.begin_loading(item);
            state.index.clone_from(&index);
        });
        if !current {
            return;
        }

        let result = self.site.render(&slug).await;

        self.apply(generation, |state| {
            match result {
                Ok(content) => {
                    let neighbours = index
                        .as_ref()
                        .map(|loaded| adjacent(loaded.index(), &slug))
                        .unwrap_or_default();
                    state.navigation.finish(content, neighbours);
                    tracing::debug!(slug = %slug, "Rendered document");
                }
                Err(e) => {
                    state.navigation.fail();
                    tracing::warn!(slug = %slug, error = %e, "Document not found");
                }
            }
            state.settled = true;
        });
    }
}

/// Drives the browser's views from location changes.
///
/// Must be used from within a Tokio runtime: each navigation runs as a
/// spawned task.
pub struct ViewRouter {
    inner: Arc<Inner>,
    extension: String,
    task: Mutex<Option<JoinHandle<()>>>,
    intents_tx: mpsc::UnboundedSender<NavigationIntent>,
    intents_rx: Mutex<Option<mpsc::UnboundedReceiver<NavigationIntent>>>,
}

impl ViewRouter {
    /// Create a router over `site` using `scheme` to read locations.
    #[must_use]
    pub fn new(site: Arc<Site>, scheme: LocationScheme) -> Self {
        // Nothing is in flight before the first navigation.
        let (state, _) = watch::channel(ViewState {
            settled: true,
            ..ViewState::default()
        });
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (intents_tx, intents_rx) = mpsc::unbounded_channel();

        Self {
            inner: Arc::new(Inner {
                site,
                scheme,
                generation: AtomicU64::new(0),
                closed: AtomicBool::new(false),
                shutdown: Notify::new(),
                state,
                events,
            }),
            extension: "md".to_owned(),
            task: Mutex::new(None),
            intents_tx,
            intents_rx: Mutex::new(Some(intents_rx)),
        }
    }

    /// Set the markup extension stripped by link interceptors (default `md`).
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_owned();
        self
    }

    /// Location scheme in use.
    #[must_use]
    pub fn scheme(&self) -> &LocationScheme {
        &self.inner.scheme
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    /// Watch view state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.state.subscribe()
    }

    /// Receive one-shot events.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<RouterEvent> {
        self.inner.events.subscribe()
    }

    /// Wait until the current navigation has finished, then return its state.
    ///
    /// Returns the latest state immediately if the router has been shut down
    /// or has not navigated yet.
    pub async fn settled(&self) -> ViewState {
        let shutdown = self.inner.shutdown.notified();
        tokio::pin!(shutdown);
        shutdown.as_mut().enable();
        if self.is_closed() {
            return self.state();
        }

        let mut rx = self.subscribe();
        tokio::select! {
            result = rx.wait_for(|state| state.settled) => match result {
                Ok(state) => state.clone(),
                Err(_) => self.state(),
            },
            () = &mut shutdown => self.state(),
        }
    }

    /// Link interceptor for the currently loaded index.
    ///
    /// Returns `None` until the index has loaded; without known slugs no
    /// click can be intercepted.
    #[must_use]
    pub fn interceptor(&self) -> Option<LinkInterceptor> {
        let index = self.inner.site.cached_index()?;
        Some(
            LinkInterceptor::new(self.inner.scheme.variant(), index, self.intents_tx.clone())
                .with_extension(&self.extension),
        )
    }

    /// React to a location change.
    ///
    /// Resets the view state, then starts whatever loading the new location
    /// needs. Results of earlier navigations still in flight are discarded.
    /// Does nothing after [`shutdown`](Self::shutdown).
    pub fn navigate(&self, location: &str) -> DocRoute {
        let route = self.inner.scheme.parse(location);
        let view = match &route {
            DocRoute::Other => View::Other,
            DocRoute::Index => View::Index,
            DocRoute::Document(_) => View::Document,
        };
        let index = if route.is_docs() {
            self.inner.site.cached_index()
        } else {
            None
        };

        let mut generation = None;
        self.inner.state.send_if_modified(|state| {
            if self.inner.closed.load(Ordering::Acquire) {
                return false;
            }
            generation = Some(self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1);
            *state = ViewState {
                view,
                index,
                navigation: NavigationState::for_slug(route.slug()),
                settled: route == DocRoute::Other,
            };
            true
        });

        let Some(generation) = generation else {
            return route;
        };
        tracing::debug!(location, ?route, generation, "Navigating");

        let task = match &route {
            DocRoute::Other => None,
            DocRoute::Index => {
                let _ = self.inner.events.send(RouterEvent::ScrollToTop);
                Some(tokio::spawn(Arc::clone(&self.inner).load_index(generation)))
            }
            DocRoute::Document(slug) => {
                let _ = self.inner.events.send(RouterEvent::ScrollToTop);
                Some(tokio::spawn(
                    Arc::clone(&self.inner).load_document(generation, slug.clone()),
                ))
            }
        };

        let previous = std::mem::replace(
            &mut *self.task.lock().unwrap_or_else(PoisonError::into_inner),
            task,
        );
        if let Some(previous) = previous {
            previous.abort();
        }

        route
    }

    /// Navigate to a document (or the index) in this router's scheme.
    pub fn navigate_to(&self, slug: Option<&str>) -> DocRoute {
        self.navigate(&self.inner.scheme.location_for(slug))
    }

    /// Drive the router from a stream of location changes.
    ///
    /// Intents from interceptors handed out by [`interceptor`](Self::interceptor)
    /// are turned into navigations as well and announced with
    /// [`RouterEvent::Navigated`]. Returns when `locations` closes or the
    /// router is shut down. Intents are only consumed by the first call.
    pub async fn run(&self, mut locations: mpsc::Receiver<String>) {
        let mut intents = self
            .intents_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let shutdown = self.inner.shutdown.notified();
        tokio::pin!(shutdown);
        shutdown.as_mut().enable();

        loop {
            if self.is_closed() {
                break;
            }

            tokio::select! {
                () = &mut shutdown => break,
                location = locations.recv() => match location {
                    Some(location) => {
                        self.navigate(&location);
                    }
                    None => break,
                },
                Some(intent) = recv_intent(&mut intents) => {
                    let location = self.inner.scheme.location_for(Some(&intent.slug));
                    self.navigate(&location);
                    if !self.is_closed() {
                        let _ = self.inner.events.send(RouterEvent::Navigated(location));
                    }
                }
            }
        }
    }

    /// Whether the router has been shut down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Tear down: abort in-flight work and suppress all later effects.
    pub fn shutdown(&self) {
        // Taking the state lock orders this after any update being applied.
        self.inner.state.send_if_modified(|_| {
            self.inner.closed.store(true, Ordering::Release);
            false
        });
        self.inner.shutdown.notify_waiters();

        if let Some(task) = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}

impl Drop for ViewRouter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Receive the next intent, or pend forever when there is no receiver.
async fn recv_intent(
    intents: &mut Option<mpsc::UnboundedReceiver<NavigationIntent>>,
) -> Option<NavigationIntent> {
    match intents {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio_site::SiteConfig;
    use folio_source::{MockSource, Source};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::links::{ClickOutcome, LinkClick};

    const INDEX_JSON: &str = r#"{
        "title": "Documentation",
        "sections": [
            {"title": "Basics", "items": [
                {"slug": "welcome", "title": "Welcome", "description": "Start here"},
                {"slug": "install", "title": "Install", "description": "Get set up"}
            ]},
            {"title": "Guides", "items": [
                {"slug": "intro-basics", "title": "Intro", "description": "The basics"}
            ]}
        ]
    }"#;

    fn source() -> MockSource {
        MockSource::new()
            .with_resource("index.json", INDEX_JSON)
            .with_resource("docs/welcome.md", "# Welcome\n\nSee [install](install.md).")
            .with_resource("docs/install.md", "# Install")
            .with_resource("docs/intro-basics.md", "# Intro")
    }

    fn router_with(source: MockSource) -> (ViewRouter, Arc<MockSource>) {
        let source = Arc::new(source);
        let site = Arc::new(Site::new(
            Arc::clone(&source) as Arc<dyn Source>,
            SiteConfig::default(),
        ));
        (ViewRouter::new(site, LocationScheme::hash("docs")), source)
    }

    #[tokio::test]
    async fn test_other_location_fetches_nothing() {
        let (router, source) = router_with(source());

        assert_eq!(router.navigate("#home"), DocRoute::Other);
        let state = router.settled().await;

        assert_eq!(state.view, View::Other);
        assert!(state.index.is_none());
        assert_eq!(source.total_fetches(), 0);
    }

    #[tokio::test]
    async fn test_index_view_loads_index() {
        let (router, _source) = router_with(source());

        router.navigate("#docs");
        let state = router.settled().await;

        assert_eq!(state.view, View::Index);
        assert_eq!(state.navigation.slug, None);
        let index = state.index.unwrap();
        assert_eq!(index.index().sections.len(), 2);
    }

    #[tokio::test]
    async fn test_index_view_without_index() {
        let (router, _source) = router_with(MockSource::new());

        router.navigate("#docs");
        let state = router.settled().await;

        assert_eq!(state.view, View::Index);
        assert!(state.index.is_none());
    }

    #[tokio::test]
    async fn test_document_rendered_with_neighbours() {
        let (router, _source) = router_with(source());

        router.navigate("#docs/install");
        let state = router.settled().await;
        let nav = state.navigation;

        assert_eq!(state.view, View::Document);
        assert_eq!(nav.slug.as_deref(), Some("install"));
        assert!(!nav.loading);
        assert!(!nav.error);
        assert_eq!(nav.title, "Install");
        assert_eq!(nav.description, "Get set up");
        assert_eq!(nav.content.unwrap().title.as_deref(), Some("Install"));
        assert_eq!(nav.prev.unwrap().slug, "welcome");
        assert_eq!(nav.next.unwrap().slug, "intro-basics");
    }

    #[tokio::test]
    async fn test_missing_document_sets_error() {
        let (router, _source) = router_with(source().with_status("docs/install.md", 404));

        router.navigate("#docs/install");
        let nav = router.settled().await.navigation;

        assert!(nav.error);
        assert!(!nav.loading);
        assert!(nav.content.is_none());
        // Title still comes from the index entry.
        assert_eq!(nav.title, "Install");
    }

    #[tokio::test]
    async fn test_unlisted_document_leaves_metadata_blank() {
        let (router, _source) = router_with(source().with_resource("docs/extra.md", "# Extra"));

        router.navigate("#docs/extra");
        let nav = router.settled().await.navigation;

        assert!(nav.is_rendered());
        assert_eq!(nav.title, "");
        assert!(nav.prev.is_none());
        assert!(nav.next.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_state_while_fetch_in_flight() {
        let (router, _source) =
            router_with(source().with_delay("docs/install.md", Duration::from_secs(1)));
        let mut rx = router.subscribe();

        router.navigate("#docs/install");
        let loading = rx
            .wait_for(|state| state.navigation.loading)
            .await
            .unwrap()
            .clone();

        assert!(!loading.navigation.error);
        assert!(loading.navigation.content.is_none());
        assert!(!loading.settled);

        let settled = router.settled().await;
        assert!(settled.navigation.is_rendered());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_navigation_is_discarded() {
        let (router, _source) = router_with(
            source()
                .with_delay("docs/welcome.md", Duration::from_secs(5))
                .with_delay("docs/install.md", Duration::from_millis(10)),
        );

        router.navigate("#docs/welcome");
        tokio::time::sleep(Duration::from_millis(1)).await;
        router.navigate("#docs/install");

        let state = router.settled().await;
        assert_eq!(state.navigation.slug.as_deref(), Some("install"));

        // Let the superseded fetch's delay elapse.
        tokio::time::sleep(Duration::from_secs(10)).await;

        let state = router.state();
        assert_eq!(state.navigation.slug.as_deref(), Some("install"));
        assert_eq!(
            state.navigation.content.unwrap().title.as_deref(),
            Some("Install")
        );
    }

    #[tokio::test]
    async fn test_stale_generation_rejected_by_apply() {
        let (router, _source) = router_with(source());

        router.navigate("#docs/welcome");
        let stale = router.inner.generation.load(Ordering::Acquire);
        router.navigate("#docs/install");

        assert!(!router.inner.apply(stale, |state| state.navigation.fail()));
        let state = router.settled().await;
        assert!(!state.navigation.error);
    }

    #[tokio::test]
    async fn test_index_fetched_once_across_navigations() {
        let (router, source) = router_with(source());

        router.navigate("#docs/welcome");
        router.settled().await;
        router.navigate("#docs/install");
        router.settled().await;
        router.navigate("#docs");
        router.settled().await;

        assert_eq!(source.fetch_count("index.json"), 1);
    }

    #[tokio::test]
    async fn test_scroll_to_top_on_entering_docs() {
        let (router, _source) = router_with(source());
        let mut events = router.events();

        router.navigate("#home");
        router.navigate("#docs");

        assert_eq!(events.recv().await.unwrap(), RouterEvent::ScrollToTop);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_suppresses_effects() {
        let (router, _source) =
            router_with(source().with_delay("docs/install.md", Duration::from_secs(1)));
        let mut events = router.events();

        router.navigate("#docs/install");
        assert_eq!(events.recv().await.unwrap(), RouterEvent::ScrollToTop);

        router.shutdown();
        let before = router.state();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let after = router.state();
        assert!(!after.navigation.is_rendered());
        assert_eq!(after.navigation, before.navigation);

        router.navigate("#docs/welcome");
        assert_eq!(router.state().navigation.slug.as_deref(), Some("install"));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_wakes_on_shutdown() {
        let (router, _source) =
            router_with(source().with_delay("docs/install.md", Duration::from_secs(60)));
        let router = Arc::new(router);

        router.navigate("#docs/install");
        let waiter = {
            let router = Arc::clone(&router);
            tokio::spawn(async move { router.settled().await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        router.shutdown();

        let state = waiter.await.unwrap();
        assert!(!state.settled);
        assert!(router.is_closed());
    }

    #[tokio::test]
    async fn test_settled_before_any_navigation() {
        let (router, source) = router_with(source());

        let state = tokio::time::timeout(Duration::from_secs(1), router.settled())
            .await
            .unwrap();

        assert_eq!(state.view, View::Other);
        assert!(state.settled);
        assert!(state.index.is_none());
        assert_eq!(source.total_fetches(), 0);
    }

    #[tokio::test]
    async fn test_interceptor_requires_loaded_index() {
        let (router, _source) = router_with(source());
        assert!(router.interceptor().is_none());

        router.navigate("#docs");
        router.settled().await;

        let interceptor = router.interceptor().unwrap();
        assert_eq!(
            interceptor.classify(Some("install.md")),
            ClickOutcome::Navigate("install".to_owned())
        );
    }

    #[tokio::test]
    async fn test_run_follows_locations_and_intents() {
        let (router, _source) = router_with(source());
        let router = Arc::new(router);
        let mut events = router.events();
        let (tx, rx) = mpsc::channel(8);

        let runner = {
            let router = Arc::clone(&router);
            tokio::spawn(async move { router.run(rx).await })
        };

        tx.send("#docs/welcome".to_owned()).await.unwrap();
        let mut state_rx = router.subscribe();
        state_rx
            .wait_for(|s| s.settled && s.navigation.slug.as_deref() == Some("welcome"))
            .await
            .unwrap();

        let interceptor = router.interceptor().unwrap();
        let outcome = interceptor.on_click(&LinkClick::on("install.md"));
        assert_eq!(outcome, ClickOutcome::Navigate("install".to_owned()));

        state_rx
            .wait_for(|s| s.settled && s.navigation.slug.as_deref() == Some("install"))
            .await
            .unwrap();

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        assert!(seen.contains(&RouterEvent::Navigated("#docs/install".to_owned())));

        drop(tx);
        runner.await.unwrap();
    }
}
