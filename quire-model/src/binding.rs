//! Property-driven form/table binding.
//!
//! Picks the editor widget for each resolved property and the default width
//! of its table column. Broken property configs are reported per field so the
//! rest of the form still renders.

use crate::collection::ResolvedCollection;
use crate::error::{ConfigError, ConfigResult};
use crate::property::{
    ArrayProperty, EnumValueConfig, NumberProperty, Property, PropertyKind, ResolvedProperty, StorageConfig,
    StringProperty,
};
use serde::Serialize;
use tracing::warn;

/// Editor widget a property is bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum FieldBinding {
    Text { multiline: bool },
    Markdown,
    Select { values: Vec<EnumValueConfig> },
    MultiSelect { values: Vec<EnumValueConfig> },
    Number,
    Switch,
    DateTime,
    StorageUpload { multiple: bool },
    Reference { path: String },
    ArrayOfReferences { path: String },
    /// Sortable list of sub-fields, one per array item.
    Repeat,
    /// Array of heterogeneous items discriminated by `type_field`.
    Block { type_field: String, types: Vec<String> },
    Map { keys: Vec<String> },
    /// Free-form map without declared properties.
    KeyValue,
    ReadOnly,
}

/// Binding outcome for one property of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSlot {
    pub key: String,
    pub binding: ConfigResult<FieldBinding>,
}

/// Chooses the editor widget for `property`.
pub fn select_field_binding(key: &str, property: &ResolvedProperty) -> ConfigResult<FieldBinding> {
    if property.common().read_only {
        return Ok(FieldBinding::ReadOnly);
    }
    binding_for(key, &property.property)
}

fn binding_for(key: &str, property: &Property) -> ConfigResult<FieldBinding> {
    match &property.kind {
        PropertyKind::String(string) => string_binding(key, string),
        PropertyKind::Number(NumberProperty { enum_values, .. }) => match enum_values {
            Some(values) => Ok(FieldBinding::Select {
                values: non_empty_enum(key, values.to_configs())?,
            }),
            None => Ok(FieldBinding::Number),
        },
        PropertyKind::Boolean => Ok(FieldBinding::Switch),
        PropertyKind::Date(_) => Ok(FieldBinding::DateTime),
        PropertyKind::Geopoint => Ok(FieldBinding::ReadOnly),
        PropertyKind::Reference(reference) => Ok(FieldBinding::Reference {
            path: reference.path.clone(),
        }),
        PropertyKind::Array(array) => array_binding(key, array),
        PropertyKind::Map(map) if map.properties.is_empty() => Ok(FieldBinding::KeyValue),
        PropertyKind::Map(map) => Ok(FieldBinding::Map {
            keys: map.properties.keys().cloned().collect(),
        }),
    }
}

fn string_binding(key: &str, string: &StringProperty) -> ConfigResult<FieldBinding> {
    if let Some(storage) = &string.storage {
        check_storage(key, storage)?;
        return Ok(FieldBinding::StorageUpload { multiple: false });
    }
    if let Some(values) = &string.enum_values {
        return Ok(FieldBinding::Select {
            values: non_empty_enum(key, values.to_configs())?,
        });
    }
    if string.markdown {
        return Ok(FieldBinding::Markdown);
    }
    Ok(FieldBinding::Text {
        multiline: string.multiline,
    })
}

fn array_binding(key: &str, array: &ArrayProperty) -> ConfigResult<FieldBinding> {
    if let Some(of) = array.of.as_deref() {
        return match &of.kind {
            PropertyKind::Reference(reference) => Ok(FieldBinding::ArrayOfReferences {
                path: reference.path.clone(),
            }),
            PropertyKind::String(StringProperty {
                storage: Some(storage), ..
            }) => {
                check_storage(key, storage)?;
                Ok(FieldBinding::StorageUpload { multiple: true })
            }
            PropertyKind::String(StringProperty {
                enum_values: Some(values),
                ..
            })
            | PropertyKind::Number(NumberProperty {
                enum_values: Some(values),
                ..
            }) => Ok(FieldBinding::MultiSelect {
                values: non_empty_enum(key, values.to_configs())?,
            }),
            _ => Ok(FieldBinding::Repeat),
        };
    }
    if let Some(one_of) = &array.one_of {
        return Ok(FieldBinding::Block {
            type_field: one_of.type_field.clone(),
            types: one_of.properties.keys().cloned().collect(),
        });
    }
    Err(ConfigError::MissingArrayOf {
        property: key.to_string(),
    })
}

fn non_empty_enum(key: &str, values: Vec<EnumValueConfig>) -> ConfigResult<Vec<EnumValueConfig>> {
    if values.is_empty() {
        return Err(ConfigError::MissingEnumValues {
            property: key.to_string(),
        });
    }
    Ok(values)
}

fn check_storage(key: &str, storage: &StorageConfig) -> ConfigResult<()> {
    let malformed = |reason: &str| ConfigError::MalformedStorage {
        property: key.to_string(),
        reason: reason.to_string(),
    };
    if storage.storage_path.trim().is_empty() {
        return Err(malformed("storage path is empty"));
    }
    if storage.max_size == Some(0) {
        return Err(malformed("max size must be positive"));
    }
    Ok(())
}

/// Binds every property of `collection`, in declaration order.
///
/// Properties hidden from the collection view are still bound: the form shows them.
pub fn bind_collection_fields(collection: &ResolvedCollection) -> Vec<FieldSlot> {
    collection
        .properties
        .iter()
        .map(|(key, property)| {
            let binding = select_field_binding(key, property);
            if let Err(e) = &binding {
                warn!("Field `{}` of `{}` cannot be bound: {}", key, collection.path, e);
            }
            FieldSlot {
                key: key.clone(),
                binding,
            }
        })
        .collect()
}

/// Table column width for `property`: the configured width, else a per-kind default.
pub fn table_column_width(property: &ResolvedProperty) -> u32 {
    if let Some(width) = property.common().column_width {
        return width;
    }
    match property.kind() {
        PropertyKind::String(StringProperty { storage: Some(_), .. }) => 220,
        PropertyKind::String(StringProperty { multiline: true, .. } | StringProperty { markdown: true, .. }) => 300,
        PropertyKind::String(_) => 200,
        PropertyKind::Number(_) | PropertyKind::Boolean => 140,
        PropertyKind::Date(_) => 200,
        PropertyKind::Geopoint => 200,
        PropertyKind::Reference(_) => 220,
        PropertyKind::Array(_) => 300,
        PropertyKind::Map(_) => 360,
    }
}
