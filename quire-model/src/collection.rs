use crate::entity::EntityValues;
use crate::handler::EntityCallbacks;
use crate::permissions::PermissionsConfig;
use crate::property::{PropertyContext, PropertyOrBuilder, ResolvedProperty, resolve_property};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A named, path-addressed set of entities sharing a schema.
///
/// Within its parent scope a collection is identified by `path` or `alias`.
/// Subcollections are owned by their parent and addressed relative to an
/// entity of it (`products/123/reviews`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDefinition {
    /// Data path segment(s) relative to the parent scope, e.g. `products`.
    pub path: String,
    /// Alternate lookup key, used in URLs instead of `path` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyOrBuilder>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcollections: Vec<CollectionDefinition>,
    /// Custom views attached to entities of this collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<EntityCustomView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionsConfig>,
    #[serde(skip)]
    pub callbacks: Option<Callbacks>,
    #[serde(default = "default_true")]
    pub selection_enabled: bool,
    #[serde(default = "default_true")]
    pub inline_editing: bool,
    #[serde(default = "default_true")]
    pub exportable: bool,
    #[serde(default)]
    pub text_search_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl CollectionDefinition {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
            name: name.into(),
            singular_name: None,
            group: None,
            description: None,
            properties: IndexMap::new(),
            subcollections: Vec::new(),
            views: Vec::new(),
            permissions: None,
            callbacks: None,
            selection_enabled: true,
            inline_editing: true,
            exportable: true,
            text_search_enabled: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, property: impl Into<PropertyOrBuilder>) -> Self {
        self.properties.insert(key.into(), property.into());
        self
    }

    pub fn with_subcollection(mut self, subcollection: CollectionDefinition) -> Self {
        self.subcollections.push(subcollection);
        self
    }

    pub fn with_view(mut self, view: EntityCustomView) -> Self {
        self.views.push(view);
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionsConfig) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    /// The key this collection is addressed by in URLs: alias if set, else path.
    pub fn path_or_alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.path)
    }

    /// Exact match against `path` or `alias`.
    pub fn matches(&self, key: &str) -> bool {
        self.path == key || self.alias.as_deref() == Some(key)
    }

    pub fn view(&self, path: &str) -> Option<&EntityCustomView> {
        self.views.iter().find(|v| v.path == path)
    }
}

/// A custom view shown next to the form of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCustomView {
    /// Path segment(s) after the entity id, e.g. `preview`.
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntityCustomView {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            description: None,
        }
    }
}

/// A top-level custom page of the CMS (not bound to an entity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsView {
    /// One or more URL paths; the first one is used for navigation links.
    #[serde(deserialize_with = "one_or_many")]
    pub path: Vec<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub hide_from_navigation: bool,
}

impl CmsView {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: vec![path.into()],
            name: name.into(),
            description: None,
            group: None,
            hide_from_navigation: false,
        }
    }

    pub fn primary_path(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}

/// Shared handle to a collection's [`EntityCallbacks`].
#[derive(Clone)]
pub struct Callbacks(Arc<dyn EntityCallbacks>);

impl Callbacks {
    pub fn new(callbacks: impl EntityCallbacks + 'static) -> Self {
        Self(Arc::new(callbacks))
    }

    pub fn from_arc(callbacks: Arc<dyn EntityCallbacks>) -> Self {
        Self(callbacks)
    }
}

impl Deref for Callbacks {
    type Target = dyn EntityCallbacks;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callbacks(..)")
    }
}

impl PartialEq for Callbacks {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A collection whose properties have been resolved for one entity context.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCollection {
    /// Data path the collection was resolved at.
    pub path: String,
    pub entity_id: Option<String>,
    pub properties: IndexMap<String, ResolvedProperty>,
    pub original: CollectionDefinition,
}

impl ResolvedCollection {
    pub fn property(&self, key: &str) -> Option<&ResolvedProperty> {
        self.properties.get(key)
    }
}

/// Evaluates every property builder of `collection` for the given entity.
pub fn resolve_collection(
    collection: &CollectionDefinition,
    path: &str,
    entity_id: Option<&str>,
    values: &EntityValues,
) -> ResolvedCollection {
    let ctx = PropertyContext { path, entity_id, values };
    let properties = collection
        .properties
        .iter()
        .map(|(key, property)| (key.clone(), resolve_property(property, &ctx)))
        .collect();
    ResolvedCollection {
        path: path.to_string(),
        entity_id: entity_id.map(str::to_string),
        properties,
        original: collection.clone(),
    }
}
