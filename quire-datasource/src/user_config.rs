use quire_model::{CollectionOverride, UserConfigurationPersistence};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Per-user collection settings kept in process memory.
///
/// Modifications deep-merge into what is already stored for the path.
#[derive(Debug, Default)]
pub struct MemoryUserConfigPersistence {
    configs: Mutex<HashMap<String, CollectionOverride>>,
}

impl MemoryUserConfigPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    fn configs(&self) -> MutexGuard<'_, HashMap<String, CollectionOverride>> {
        self.configs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serializes all stored overrides, keyed by path.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.configs())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let configs: HashMap<String, CollectionOverride> = serde_json::from_str(json)?;
        Ok(Self {
            configs: Mutex::new(configs),
        })
    }
}

fn key(path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path).to_string()
}

impl UserConfigurationPersistence for MemoryUserConfigPersistence {
    fn get_collection_config(&self, path: &str) -> Option<CollectionOverride> {
        self.configs().get(&key(path)).cloned()
    }

    fn on_collection_modified(&self, path: &str, partial: CollectionOverride) {
        debug!("User config modified for {}", path);
        self.configs().entry(key(path)).or_default().merge_from(&partial);
    }
}
