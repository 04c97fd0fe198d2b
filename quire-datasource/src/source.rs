//! The data-source trait.

use crate::error::{DataSourceError, DataSourceResult};
use crate::query::CollectionQuery;
use async_trait::async_trait;
use quire_model::{Entity, EntityStatus, EntityValues, ResolvedProperty};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Receives realtime updates for a collection query.
///
/// Failures are delivered to `on_error`, never returned; retrying is up to
/// the listener.
pub trait CollectionListener: Send + Sync {
    fn on_update(&self, entities: Vec<Entity>);

    fn on_error(&self, error: &DataSourceError) {
        let _ = error;
    }
}

/// Receives realtime updates for one entity. `None` means it was deleted.
pub trait EntityListener: Send + Sync {
    fn on_update(&self, entity: Option<Entity>);

    fn on_error(&self, error: &DataSourceError) {
        let _ = error;
    }
}

/// Handle to a live listener. Dropping it (or calling [`cancel`](Self::cancel))
/// stops delivery.
#[must_use = "dropping a subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// A write request for [`DataSource::save_entity`].
#[derive(Debug, Clone, PartialEq)]
pub struct SaveEntityRequest {
    /// Data path of the collection.
    pub path: String,
    /// `None` lets the data source generate an id.
    pub entity_id: Option<String>,
    pub values: EntityValues,
    pub previous_values: Option<EntityValues>,
    pub status: EntityStatus,
}

impl SaveEntityRequest {
    pub fn new(path: impl Into<String>, values: EntityValues) -> Self {
        Self {
            path: path.into(),
            entity_id: None,
            values,
            previous_values: None,
            status: EntityStatus::New,
        }
    }

    pub fn existing(path: impl Into<String>, entity_id: impl Into<String>, values: EntityValues) -> Self {
        Self {
            path: path.into(),
            entity_id: Some(entity_id.into()),
            values,
            previous_values: None,
            status: EntityStatus::Existing,
        }
    }
}

/// Backend that stores entities by collection path.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the entities matching `query`.
    async fn fetch_collection(&self, query: &CollectionQuery) -> DataSourceResult<Vec<Entity>>;

    /// Listens to the entities matching `query`. The listener receives the
    /// current result first, then every change.
    fn listen_collection(&self, query: CollectionQuery, listener: Arc<dyn CollectionListener>) -> Subscription;

    async fn fetch_entity(&self, path: &str, entity_id: &str) -> DataSourceResult<Option<Entity>>;

    fn listen_entity(&self, path: &str, entity_id: &str, listener: Arc<dyn EntityListener>) -> Subscription;

    /// Creates or replaces an entity and returns it as stored.
    async fn save_entity(&self, request: SaveEntityRequest) -> DataSourceResult<Entity>;

    async fn delete_entity(&self, entity: &Entity) -> DataSourceResult<()>;

    /// `true` if no entity other than `entity_id` holds `value` under `property_key`.
    async fn check_unique_field(
        &self,
        path: &str,
        property_key: &str,
        value: &Value,
        property: &ResolvedProperty,
        entity_id: Option<&str>,
    ) -> DataSourceResult<bool>;

    /// Generates an id for a new entity in `path`.
    fn generate_entity_id(&self, path: &str) -> String;
}
