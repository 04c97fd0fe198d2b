//! Typed partial collection definitions.
//!
//! Override layers never carry a full [`CollectionDefinition`]; they carry a
//! [`CollectionOverride`] whose `None` fields mean "leave as is". Merging is
//! explicit and ordered: the layer applied last wins on every field it defines.

use crate::collection::{Callbacks, CollectionDefinition, EntityCustomView};
use crate::permissions::PermissionsConfig;
use crate::property::{PropertyBuilder, PropertyCommon, PropertyOrBuilder};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Partial of [`PropertyCommon`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_from_collection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

impl PropertyOverride {
    pub fn column_width(width: u32) -> Self {
        Self {
            column_width: Some(width),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Folds `other` into `self`; fields `other` defines win.
    pub fn merge_from(&mut self, other: &PropertyOverride) {
        merge_opt(&mut self.name, &other.name);
        merge_opt(&mut self.description, &other.description);
        merge_opt(&mut self.column_width, &other.column_width);
        merge_opt(&mut self.hide_from_collection, &other.hide_from_collection);
        merge_opt(&mut self.read_only, &other.read_only);
    }

    pub fn apply_to(&self, common: &mut PropertyCommon) {
        if let Some(name) = &self.name {
            common.name = Some(name.clone());
        }
        if let Some(description) = &self.description {
            common.description = Some(description.clone());
        }
        if let Some(width) = self.column_width {
            common.column_width = Some(width);
        }
        if let Some(hide) = self.hide_from_collection {
            common.hide_from_collection = hide;
        }
        if let Some(read_only) = self.read_only {
            common.read_only = read_only;
        }
    }
}

/// Partial of [`CollectionDefinition`].
///
/// Subcollections, views, permissions and callbacks are code-level hooks and
/// never come from persisted JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub singular_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropertyOverride>,
    /// Replacement for the whole property map. Lets an override handler add,
    /// drop or retype properties; `properties` partials apply on top of it.
    #[serde(skip)]
    pub property_definitions: Option<IndexMap<String, PropertyOrBuilder>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_editing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exportable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_search_enabled: Option<bool>,
    #[serde(skip)]
    pub subcollections: Option<Vec<CollectionDefinition>>,
    #[serde(skip)]
    pub views: Option<Vec<EntityCustomView>>,
    #[serde(skip)]
    pub permissions: Option<PermissionsConfig>,
    #[serde(skip)]
    pub callbacks: Option<Callbacks>,
}

impl CollectionOverride {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, property: PropertyOverride) -> Self {
        self.properties.insert(key.into(), property);
        self
    }

    /// Replaces the property map with `properties`.
    pub fn with_property_definitions<I, K, P>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PropertyOrBuilder>,
    {
        self.property_definitions = Some(
            properties
                .into_iter()
                .map(|(key, property)| (key.into(), property.into()))
                .collect(),
        );
        self
    }

    /// Folds `other` into `self`; fields `other` defines win, property
    /// overrides merge key by key.
    pub fn merge_from(&mut self, other: &CollectionOverride) {
        merge_opt(&mut self.name, &other.name);
        merge_opt(&mut self.singular_name, &other.singular_name);
        merge_opt(&mut self.description, &other.description);
        merge_opt(&mut self.group, &other.group);
        if other.property_definitions.is_some() {
            self.properties.clear();
        }
        merge_opt(&mut self.property_definitions, &other.property_definitions);
        for (key, property) in &other.properties {
            self.properties.entry(key.clone()).or_default().merge_from(property);
        }
        merge_opt(&mut self.selection_enabled, &other.selection_enabled);
        merge_opt(&mut self.inline_editing, &other.inline_editing);
        merge_opt(&mut self.exportable, &other.exportable);
        merge_opt(&mut self.text_search_enabled, &other.text_search_enabled);
        merge_opt(&mut self.subcollections, &other.subcollections);
        merge_opt(&mut self.views, &other.views);
        merge_opt(&mut self.permissions, &other.permissions);
        merge_opt(&mut self.callbacks, &other.callbacks);
    }

    /// Deep-merges this partial onto a full definition.
    ///
    /// `property_definitions`, when set, replaces the property map first.
    /// Property overrides for keys the collection then does not declare are
    /// ignored: a partial cannot introduce a property without a data type.
    pub fn apply_to(&self, collection: &mut CollectionDefinition) {
        if let Some(name) = &self.name {
            collection.name = name.clone();
        }
        merge_opt(&mut collection.singular_name, &self.singular_name);
        merge_opt(&mut collection.description, &self.description);
        merge_opt(&mut collection.group, &self.group);
        if let Some(definitions) = &self.property_definitions {
            collection.properties = definitions.clone();
        }
        for (key, partial) in &self.properties {
            match collection.properties.get_mut(key) {
                Some(property) => apply_property_override(property, partial),
                None => debug!("Ignoring override for unknown property `{}` on `{}`", key, collection.path),
            }
        }
        if let Some(v) = self.selection_enabled {
            collection.selection_enabled = v;
        }
        if let Some(v) = self.inline_editing {
            collection.inline_editing = v;
        }
        if let Some(v) = self.exportable {
            collection.exportable = v;
        }
        if let Some(v) = self.text_search_enabled {
            collection.text_search_enabled = v;
        }
        if let Some(subcollections) = &self.subcollections {
            collection.subcollections = subcollections.clone();
        }
        if let Some(views) = &self.views {
            collection.views = views.clone();
        }
        if let Some(permissions) = &self.permissions {
            collection.permissions = Some(permissions.clone());
        }
        if let Some(callbacks) = &self.callbacks {
            collection.callbacks = Some(callbacks.clone());
        }
    }

    /// Builds a definition from the partial alone, for paths with no base
    /// collection. The name falls back to the path.
    pub fn into_collection(self, path: &str) -> CollectionDefinition {
        let name = self.name.clone().unwrap_or_else(|| path.to_string());
        let mut collection = CollectionDefinition::new(path, name);
        self.apply_to(&mut collection);
        collection
    }
}

fn apply_property_override(property: &mut PropertyOrBuilder, partial: &PropertyOverride) {
    match property {
        PropertyOrBuilder::Static(p) => partial.apply_to(&mut p.common),
        PropertyOrBuilder::Builder(builder) => {
            let inner = builder.clone();
            let partial = partial.clone();
            *builder = PropertyBuilder::new(move |ctx| {
                let mut built = inner.build(ctx);
                partial.apply_to(&mut built.common);
                built
            });
        }
    }
}

fn merge_opt<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if let Some(value) = source {
        *target = Some(value.clone());
    }
}
