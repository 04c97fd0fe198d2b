//! Navigation and CMS configuration.

use quire_model::{CmsView, CollectionDefinition};
use serde::{Deserialize, Serialize};

/// Where the CMS is mounted and where collections live under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationConfig {
    /// Base URL path of the CMS, e.g. `/admin`.
    pub base_path: String,
    /// Segment under the base path that prefixes collection URLs.
    pub base_collection_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            base_collection_path: "c".to_string(),
        }
    }
}

/// A complete CMS definition as loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CmsConfig {
    pub navigation: NavigationConfig,
    pub collections: Vec<CollectionDefinition>,
    pub views: Vec<CmsView>,
}

impl CmsConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
