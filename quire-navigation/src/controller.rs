//! Navigation state: loads collections and views, then serves lookups from an
//! immutable snapshot.

use crate::config::NavigationConfig;
use crate::effective::resolve_effective_collection;
use crate::error::{NavigationError, NavigationResult};
use crate::registry::resolve_aliases;
use crate::resolver::{NavigationEntry, navigation_entries_from_path};
use crate::top_nav::{TopNavigationResult, build_top_navigation};
use crate::urls::NavigationUrls;
use async_trait::async_trait;
use quire_datasource::AuthController;
use quire_model::{CmsView, CollectionDefinition, CollectionOverrideHandler, UserConfigurationPersistence};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Produces the collection list, typically depending on the signed-in user.
#[async_trait]
pub trait CollectionsBuilder: Send + Sync {
    async fn build(&self, auth: &dyn AuthController) -> NavigationResult<Vec<CollectionDefinition>>;
}

/// Produces the CMS view list.
#[async_trait]
pub trait ViewsBuilder: Send + Sync {
    async fn build(&self, auth: &dyn AuthController) -> NavigationResult<Vec<CmsView>>;
}

#[derive(Clone)]
pub enum CollectionsSource {
    Static(Vec<CollectionDefinition>),
    Builder(Arc<dyn CollectionsBuilder>),
}

impl CollectionsSource {
    async fn resolve(&self, auth: &dyn AuthController) -> NavigationResult<Vec<CollectionDefinition>> {
        match self {
            Self::Static(collections) => Ok(collections.clone()),
            Self::Builder(builder) => builder.build(auth).await,
        }
    }
}

#[derive(Clone)]
pub enum ViewsSource {
    Static(Vec<CmsView>),
    Builder(Arc<dyn ViewsBuilder>),
}

impl ViewsSource {
    async fn resolve(&self, auth: &dyn AuthController) -> NavigationResult<Vec<CmsView>> {
        match self {
            Self::Static(views) => Ok(views.clone()),
            Self::Builder(builder) => builder.build(auth).await,
        }
    }
}

impl Default for ViewsSource {
    fn default() -> Self {
        Self::Static(Vec::new())
    }
}

/// Loaded navigation state. Never changes once published.
pub struct NavigationSnapshot {
    urls: NavigationUrls,
    collections: Vec<CollectionDefinition>,
    views: Vec<CmsView>,
    top_navigation: TopNavigationResult,
    override_handler: Option<Arc<dyn CollectionOverrideHandler>>,
    user_persistence: Option<Arc<dyn UserConfigurationPersistence>>,
}

impl NavigationSnapshot {
    /// Builds a snapshot directly from resolved collections and views.
    pub fn new(urls: NavigationUrls, collections: Vec<CollectionDefinition>, views: Vec<CmsView>) -> Self {
        let top_navigation = build_top_navigation(&collections, &views, &urls);
        Self {
            urls,
            collections,
            views,
            top_navigation,
            override_handler: None,
            user_persistence: None,
        }
    }

    pub fn with_override_handler(mut self, handler: Option<Arc<dyn CollectionOverrideHandler>>) -> Self {
        self.override_handler = handler;
        self
    }

    pub fn with_user_persistence(mut self, persistence: Option<Arc<dyn UserConfigurationPersistence>>) -> Self {
        self.user_persistence = persistence;
        self
    }

    pub fn urls(&self) -> &NavigationUrls {
        &self.urls
    }

    pub fn collections(&self) -> &[CollectionDefinition] {
        &self.collections
    }

    pub fn views(&self) -> &[CmsView] {
        &self.views
    }

    pub fn top_navigation(&self) -> &TopNavigationResult {
        &self.top_navigation
    }

    pub fn navigation_entries(&self, path: &str) -> Vec<NavigationEntry<'_>> {
        navigation_entries_from_path(path, &self.collections)
    }

    /// Effective collection at `path_or_alias`. The user's persisted partial
    /// is applied only when `include_user_override` is set.
    pub fn get_collection(
        &self,
        path_or_alias: &str,
        entity_id: Option<&str>,
        include_user_override: bool,
    ) -> NavigationResult<Option<CollectionDefinition>> {
        let persistence = if include_user_override {
            self.user_persistence.as_deref()
        } else {
            None
        };
        resolve_effective_collection(
            path_or_alias,
            entity_id,
            &self.collections,
            self.override_handler.as_deref(),
            persistence,
        )
    }

    pub fn resolve_aliases(&self, path: &str) -> NavigationResult<String> {
        resolve_aliases(path, &self.collections)
    }
}

impl fmt::Debug for NavigationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationSnapshot")
            .field("urls", &self.urls)
            .field("collections", &self.collections.len())
            .field("views", &self.views.len())
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct NavigationState {
    snapshot: Option<Arc<NavigationSnapshot>>,
    loading: bool,
    error: Option<NavigationError>,
}

/// Owns the navigation inputs and the latest published snapshot.
///
/// Each [`refresh`](Self::refresh) takes a generation number. Only the most
/// recently started refresh may publish; a slower earlier one is dropped when
/// it completes.
pub struct NavigationController {
    urls: NavigationUrls,
    auth: Arc<dyn AuthController>,
    collections: CollectionsSource,
    views: ViewsSource,
    override_handler: Option<Arc<dyn CollectionOverrideHandler>>,
    user_persistence: Option<Arc<dyn UserConfigurationPersistence>>,
    state: Arc<RwLock<NavigationState>>,
    generation: AtomicU64,
}

impl NavigationController {
    pub fn new(
        config: &NavigationConfig,
        auth: Arc<dyn AuthController>,
        collections: CollectionsSource,
        views: ViewsSource,
    ) -> Self {
        Self {
            urls: NavigationUrls::new(config),
            auth,
            collections,
            views,
            override_handler: None,
            user_persistence: None,
            state: Arc::new(RwLock::new(NavigationState::default())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_override_handler(mut self, handler: Arc<dyn CollectionOverrideHandler>) -> Self {
        self.override_handler = Some(handler);
        self
    }

    pub fn with_user_persistence(mut self, persistence: Arc<dyn UserConfigurationPersistence>) -> Self {
        self.user_persistence = Some(persistence);
        self
    }

    pub fn urls(&self) -> &NavigationUrls {
        &self.urls
    }

    /// Resolves collections and views concurrently and publishes a new snapshot.
    ///
    /// A builder failure is stored as the blocking error and returned; the
    /// previous snapshot, if any, stays published.
    pub async fn refresh(&self) -> NavigationResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.loading = true;

        let auth = self.auth.as_ref();
        let (collections, views) = tokio::join!(self.collections.resolve(auth), self.views.resolve(auth));

        let mut state = self.state.write().await;
        if generation < self.generation.load(Ordering::SeqCst) {
            debug!("Dropping navigation result {} superseded by a newer refresh", generation);
            return Ok(());
        }
        state.loading = false;

        let (collections, views) = match (collections, views) {
            (Ok(collections), Ok(views)) => (collections, views),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Navigation loading failed: {}", e);
                state.error = Some(e.clone());
                return Err(e);
            }
        };

        let snapshot = NavigationSnapshot::new(self.urls.clone(), collections, views)
            .with_override_handler(self.override_handler.clone())
            .with_user_persistence(self.user_persistence.clone());
        info!(
            "Navigation loaded: {} collections, {} views",
            snapshot.collections.len(),
            snapshot.views.len()
        );
        state.snapshot = Some(Arc::new(snapshot));
        state.error = None;
        Ok(())
    }

    /// True until the first successful load, and while a refresh is running.
    pub async fn loading(&self) -> bool {
        let state = self.state.read().await;
        state.snapshot.is_none() || state.loading
    }

    pub async fn initialised(&self) -> bool {
        self.state.read().await.snapshot.is_some()
    }

    /// Error of the latest refresh, cleared by the next successful one.
    pub async fn navigation_loading_error(&self) -> Option<NavigationError> {
        self.state.read().await.error.clone()
    }

    /// The published snapshot. Fails before the first successful load.
    pub async fn snapshot(&self) -> NavigationResult<Arc<NavigationSnapshot>> {
        self.state
            .read()
            .await
            .snapshot
            .clone()
            .ok_or(NavigationError::NotInitialised)
    }

    pub async fn get_collection(
        &self,
        path_or_alias: &str,
        entity_id: Option<&str>,
        include_user_override: bool,
    ) -> NavigationResult<Option<CollectionDefinition>> {
        self.snapshot()
            .await?
            .get_collection(path_or_alias, entity_id, include_user_override)
    }

    pub async fn resolve_aliases(&self, path: &str) -> NavigationResult<String> {
        self.snapshot().await?.resolve_aliases(path)
    }

    pub async fn top_navigation(&self) -> NavigationResult<TopNavigationResult> {
        Ok(self.snapshot().await?.top_navigation().clone())
    }

    /// Absolute paths and kinds of the entries `path` resolves to.
    pub async fn navigation_paths(&self, path: &str) -> NavigationResult<Vec<(&'static str, String)>> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot
            .navigation_entries(path)
            .iter()
            .map(|entry| (entry.kind(), entry.path().to_string()))
            .collect())
    }
}
