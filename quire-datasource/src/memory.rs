//! In-memory [`DataSource`].

use crate::error::{DataSourceError, DataSourceResult};
use crate::query::CollectionQuery;
use crate::source::{CollectionListener, DataSource, EntityListener, SaveEntityRequest, Subscription};
use async_trait::async_trait;
use indexmap::IndexMap;
use quire_model::{Entity, EntityValues, ResolvedProperty};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    /// Collection path -> entity id -> values, in insertion order.
    collections: HashMap<String, IndexMap<String, EntityValues>>,
    collection_listeners: HashMap<u64, (CollectionQuery, Arc<dyn CollectionListener>)>,
    entity_listeners: HashMap<u64, (String, String, Arc<dyn EntityListener>)>,
    next_listener_id: u64,
    offline: Option<String>,
}

impl MemoryState {
    fn entities(&self, path: &str) -> Vec<Entity> {
        self.collections
            .get(path)
            .map(|entities| {
                entities
                    .iter()
                    .map(|(id, values)| Entity::new(id.clone(), path, values.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn entity(&self, path: &str, entity_id: &str) -> Option<Entity> {
        self.collections
            .get(path)
            .and_then(|entities| entities.get(entity_id))
            .map(|values| Entity::new(entity_id, path, values.clone()))
    }

    fn check_online(&self) -> DataSourceResult<()> {
        match &self.offline {
            Some(reason) => Err(DataSourceError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn allocate_listener_id(&mut self) -> u64 {
        self.next_listener_id += 1;
        self.next_listener_id
    }
}

type Notification = Box<dyn FnOnce() + Send>;

/// Entity store kept in process memory.
///
/// Listeners are notified synchronously after each write, outside the lock.
#[derive(Clone, Default)]
pub struct MemoryDataSource {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `path` with entities, bypassing listeners.
    pub fn with_entities<I, K>(self, path: &str, entities: I) -> Self
    where
        I: IntoIterator<Item = (K, EntityValues)>,
        K: Into<String>,
    {
        {
            let mut state = self.lock();
            let collection = state.collections.entry(path.to_string()).or_default();
            for (id, values) in entities {
                collection.insert(id.into(), values);
            }
        }
        self
    }

    /// Simulates a backend outage: operations fail with `Unavailable` and
    /// listeners receive `on_error`. Pass `None` to come back online.
    pub fn set_offline(&self, reason: Option<&str>) {
        let notifications = {
            let mut state = self.lock();
            state.offline = reason.map(str::to_string);
            match &state.offline {
                Some(reason) => error_notifications(&state, reason),
                None => Vec::new(),
            }
        };
        notifications.into_iter().for_each(|notify| notify());
    }

    /// Number of live listeners, for leak checks.
    pub fn listener_count(&self) -> usize {
        let state = self.lock();
        state.collection_listeners.len() + state.entity_listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify_path(&self, path: &str, entity_id: &str) {
        let notifications: Vec<Notification> = {
            let state = self.lock();
            let mut out: Vec<Notification> = Vec::new();
            for (query, listener) in state.collection_listeners.values() {
                if query.path == path {
                    let entities = query.apply(state.entities(path));
                    let listener = Arc::clone(listener);
                    out.push(Box::new(move || listener.on_update(entities)));
                }
            }
            for (listen_path, listen_id, listener) in state.entity_listeners.values() {
                if listen_path == path && listen_id == entity_id {
                    let entity = state.entity(path, entity_id);
                    let listener = Arc::clone(listener);
                    out.push(Box::new(move || listener.on_update(entity)));
                }
            }
            out
        };
        debug!("Notifying {} listeners of change to {}/{}", notifications.len(), path, entity_id);
        notifications.into_iter().for_each(|notify| notify());
    }
}

fn error_notifications(state: &MemoryState, reason: &str) -> Vec<Notification> {
    let mut out: Vec<Notification> = Vec::new();
    for (_, listener) in state.collection_listeners.values() {
        let listener = Arc::clone(listener);
        let reason = reason.to_string();
        out.push(Box::new(move || listener.on_error(&DataSourceError::Unavailable(reason))));
    }
    for (_, _, listener) in state.entity_listeners.values() {
        let listener = Arc::clone(listener);
        let reason = reason.to_string();
        out.push(Box::new(move || listener.on_error(&DataSourceError::Unavailable(reason))));
    }
    out
}

fn unsubscribe(state: Weak<Mutex<MemoryState>>, id: u64) -> Subscription {
    Subscription::new(move || {
        if let Some(state) = state.upgrade() {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.collection_listeners.remove(&id);
            state.entity_listeners.remove(&id);
        }
    })
}

#[async_trait]
impl DataSource for MemoryDataSource {
    async fn fetch_collection(&self, query: &CollectionQuery) -> DataSourceResult<Vec<Entity>> {
        let state = self.lock();
        state.check_online()?;
        Ok(query.apply(state.entities(&query.path)))
    }

    fn listen_collection(&self, query: CollectionQuery, listener: Arc<dyn CollectionListener>) -> Subscription {
        let (id, initial) = {
            let mut state = self.lock();
            let initial = match state.check_online() {
                Ok(()) => Ok(query.apply(state.entities(&query.path))),
                Err(e) => Err(e),
            };
            let id = state.allocate_listener_id();
            state.collection_listeners.insert(id, (query, Arc::clone(&listener)));
            (id, initial)
        };
        match initial {
            Ok(entities) => listener.on_update(entities),
            Err(e) => listener.on_error(&e),
        }
        unsubscribe(Arc::downgrade(&self.state), id)
    }

    async fn fetch_entity(&self, path: &str, entity_id: &str) -> DataSourceResult<Option<Entity>> {
        let state = self.lock();
        state.check_online()?;
        Ok(state.entity(path, entity_id))
    }

    fn listen_entity(&self, path: &str, entity_id: &str, listener: Arc<dyn EntityListener>) -> Subscription {
        let (id, initial) = {
            let mut state = self.lock();
            let initial = match state.check_online() {
                Ok(()) => Ok(state.entity(path, entity_id)),
                Err(e) => Err(e),
            };
            let id = state.allocate_listener_id();
            state
                .entity_listeners
                .insert(id, (path.to_string(), entity_id.to_string(), Arc::clone(&listener)));
            (id, initial)
        };
        match initial {
            Ok(entity) => listener.on_update(entity),
            Err(e) => listener.on_error(&e),
        }
        unsubscribe(Arc::downgrade(&self.state), id)
    }

    async fn save_entity(&self, request: SaveEntityRequest) -> DataSourceResult<Entity> {
        let entity_id = match &request.entity_id {
            Some(id) => id.clone(),
            None => self.generate_entity_id(&request.path),
        };
        {
            let mut state = self.lock();
            state.check_online()?;
            state
                .collections
                .entry(request.path.clone())
                .or_default()
                .insert(entity_id.clone(), request.values.clone());
        }
        debug!("Saved {}/{} ({:?})", request.path, entity_id, request.status);
        self.notify_path(&request.path, &entity_id);
        Ok(Entity::new(entity_id, request.path, request.values))
    }

    async fn delete_entity(&self, entity: &Entity) -> DataSourceResult<()> {
        {
            let mut state = self.lock();
            state.check_online()?;
            let removed = state
                .collections
                .get_mut(&entity.path)
                .and_then(|entities| entities.shift_remove(&entity.id));
            if removed.is_none() {
                return Err(DataSourceError::NotFound {
                    path: entity.path.clone(),
                    entity_id: entity.id.clone(),
                });
            }
        }
        debug!("Deleted {}", entity.full_path());
        self.notify_path(&entity.path, &entity.id);
        Ok(())
    }

    async fn check_unique_field(
        &self,
        path: &str,
        property_key: &str,
        value: &Value,
        _property: &ResolvedProperty,
        entity_id: Option<&str>,
    ) -> DataSourceResult<bool> {
        if value.is_null() || value.as_str().is_some_and(str::is_empty) {
            return Ok(true);
        }
        let state = self.lock();
        state.check_online()?;
        let taken = state.collections.get(path).is_some_and(|entities| {
            entities
                .iter()
                .any(|(id, values)| Some(id.as_str()) != entity_id && values.get(property_key) == Some(value))
        });
        Ok(!taken)
    }

    fn generate_entity_id(&self, _path: &str) -> String {
        Uuid::now_v7().simple().to_string()
    }
}
