//! Property definitions.
//!
//! A [`Property`] is split into the fields every data kind shares
//! ([`PropertyCommon`]) and the kind-specific constraints ([`PropertyKind`]).
//! The JSON form matches the CMS config format: a flat object discriminated by
//! `"dataType"`, e.g. `{"dataType": "string", "name": "Title", "multiline": true}`.

use crate::entity::EntityValues;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Validation flags checked before an entity is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyValidation {
    pub required: bool,
    pub unique: bool,
}

/// Fields shared by every property kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCommon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Width of the table column, in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<u32>,
    #[serde(default)]
    pub hide_from_collection: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<PropertyValidation>,
}

/// A typed field definition within a collection's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(flatten)]
    pub common: PropertyCommon,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl Property {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            common: PropertyCommon::default(),
            kind,
        }
    }

    pub fn string() -> Self {
        Self::new(PropertyKind::String(StringProperty::default()))
    }

    pub fn number() -> Self {
        Self::new(PropertyKind::Number(NumberProperty::default()))
    }

    pub fn boolean() -> Self {
        Self::new(PropertyKind::Boolean)
    }

    pub fn date() -> Self {
        Self::new(PropertyKind::Date(DateProperty::default()))
    }

    pub fn geopoint() -> Self {
        Self::new(PropertyKind::Geopoint)
    }

    /// Reference to an entity in the collection at `path`.
    pub fn reference(path: impl Into<String>) -> Self {
        Self::new(PropertyKind::Reference(ReferenceProperty {
            path: path.into(),
            preview_properties: Vec::new(),
        }))
    }

    /// Array whose items are all of one property type.
    pub fn array_of(of: Property) -> Self {
        Self::new(PropertyKind::Array(ArrayProperty {
            of: Some(Box::new(of)),
            ..Default::default()
        }))
    }

    /// Map with nested properties, in declaration order.
    pub fn map<K: Into<String>>(properties: impl IntoIterator<Item = (K, Property)>) -> Self {
        Self::new(PropertyKind::Map(MapProperty {
            properties: properties.into_iter().map(|(k, p)| (k.into(), p)).collect(),
            spread_children: false,
        }))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.common.name = Some(name.into());
        self
    }

    pub fn with_column_width(mut self, width: u32) -> Self {
        self.common.column_width = Some(width);
        self
    }

    pub fn with_validation(mut self, validation: PropertyValidation) -> Self {
        self.common.validation = Some(validation);
        self
    }

    /// Attaches enum values. Only string and number properties carry enums;
    /// other kinds are returned unchanged.
    pub fn with_enum_values(mut self, values: EnumValues) -> Self {
        match &mut self.kind {
            PropertyKind::String(s) => s.enum_values = Some(values),
            PropertyKind::Number(n) => n.enum_values = Some(values),
            _ => {}
        }
        self
    }

    /// Human-readable label, falling back to the property key.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.common.name.as_deref().unwrap_or(key)
    }

    pub fn is_unique(&self) -> bool {
        self.common.validation.as_ref().is_some_and(|v| v.unique)
    }

    pub fn is_required(&self) -> bool {
        self.common.validation.as_ref().is_some_and(|v| v.required)
    }

    /// Enum values for string and number properties.
    pub fn enum_values(&self) -> Option<&EnumValues> {
        match &self.kind {
            PropertyKind::String(s) => s.enum_values.as_ref(),
            PropertyKind::Number(n) => n.enum_values.as_ref(),
            _ => None,
        }
    }
}

/// Data kind of a property, with its kind-specific constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType", rename_all = "lowercase")]
pub enum PropertyKind {
    String(StringProperty),
    Number(NumberProperty),
    Boolean,
    Date(DateProperty),
    Geopoint,
    Reference(ReferenceProperty),
    Array(ArrayProperty),
    Map(MapProperty),
}

impl PropertyKind {
    /// The `dataType` discriminant as it appears in config.
    pub fn data_type(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean => "boolean",
            Self::Date(_) => "date",
            Self::Geopoint => "geopoint",
            Self::Reference(_) => "reference",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<EnumValues>,
    /// Present when the string holds the storage path of an uploaded file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
    pub multiline: bool,
    pub markdown: bool,
    pub url: bool,
    pub email: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<EnumValues>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateMode {
    Date,
    #[default]
    DateTime,
}

/// Timestamp filled in by the data source rather than the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoValue {
    OnCreate,
    OnUpdate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateProperty {
    pub mode: DateMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_value: Option<AutoValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceProperty {
    /// Data path of the referenced collection.
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_properties: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrayProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of: Option<Box<Property>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<OneOf>,
    pub expanded: bool,
}

/// Heterogeneous array items, discriminated by `type_field`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneOf {
    pub properties: IndexMap<String, Property>,
    #[serde(default = "default_type_field")]
    pub type_field: String,
    #[serde(default = "default_value_field")]
    pub value_field: String,
}

fn default_type_field() -> String {
    "type".to_string()
}

fn default_value_field() -> String {
    "value".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapProperty {
    pub properties: IndexMap<String, Property>,
    pub spread_children: bool,
}

/// Where uploaded files for a string property are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    pub storage_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_files: Vec<String>,
    /// Maximum upload size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    /// Store the download URL instead of the storage path.
    #[serde(default)]
    pub store_url: bool,
}

/// One selectable enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl EnumValueConfig {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
            color: None,
        }
    }
}

/// Enum values as declared: an explicit list, or an ordered `id -> label` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValues {
    List(Vec<EnumValueConfig>),
    Map(IndexMap<String, String>),
}

impl EnumValues {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(list) => list.is_empty(),
            Self::Map(map) => map.is_empty(),
        }
    }

    /// Normalized list form, in declaration order.
    pub fn to_configs(&self) -> Vec<EnumValueConfig> {
        match self {
            Self::List(list) => list.clone(),
            Self::Map(map) => map.iter().map(|(id, label)| EnumValueConfig::new(id, label)).collect(),
        }
    }
}

/// Context a [`PropertyBuilder`] is evaluated in.
#[derive(Debug, Clone, Copy)]
pub struct PropertyContext<'a> {
    /// Data path of the collection.
    pub path: &'a str,
    pub entity_id: Option<&'a str>,
    /// Current values of the entity being edited (empty for new entities).
    pub values: &'a EntityValues,
}

type BuildFn = dyn Fn(&PropertyContext<'_>) -> Property + Send + Sync;

/// A property computed from the entity it is rendered for.
#[derive(Clone)]
pub struct PropertyBuilder(Arc<BuildFn>);

impl PropertyBuilder {
    pub fn new(f: impl Fn(&PropertyContext<'_>) -> Property + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn build(&self, ctx: &PropertyContext<'_>) -> Property {
        (self.0)(ctx)
    }
}

impl fmt::Debug for PropertyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PropertyBuilder(..)")
    }
}

impl PartialEq for PropertyBuilder {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A property as declared on a collection: static, or built per entity.
///
/// Only the static form round-trips through JSON; serializing a builder fails.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyOrBuilder {
    Static(Property),
    Builder(PropertyBuilder),
}

impl From<Property> for PropertyOrBuilder {
    fn from(property: Property) -> Self {
        Self::Static(property)
    }
}

impl From<PropertyBuilder> for PropertyOrBuilder {
    fn from(builder: PropertyBuilder) -> Self {
        Self::Builder(builder)
    }
}

impl PropertyOrBuilder {
    pub fn as_static(&self) -> Option<&Property> {
        match self {
            Self::Static(p) => Some(p),
            Self::Builder(_) => None,
        }
    }
}

impl Serialize for PropertyOrBuilder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Static(property) => property.serialize(serializer),
            Self::Builder(_) => Err(serde::ser::Error::custom("property builders cannot be serialized")),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyOrBuilder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Property::deserialize(deserializer).map(Self::Static)
    }
}

/// A property with every builder evaluated for one entity context.
///
/// Enum values are always in list form. Nothing reachable from here can hold
/// a [`PropertyBuilder`]: only top-level collection properties may be builders.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProperty {
    pub property: Property,
    pub from_builder: bool,
}

impl ResolvedProperty {
    pub fn kind(&self) -> &PropertyKind {
        &self.property.kind
    }

    pub fn common(&self) -> &PropertyCommon {
        &self.property.common
    }
}

/// Evaluates `property` for the given context.
pub fn resolve_property(property: &PropertyOrBuilder, ctx: &PropertyContext<'_>) -> ResolvedProperty {
    let (mut property, from_builder) = match property {
        PropertyOrBuilder::Static(p) => (p.clone(), false),
        PropertyOrBuilder::Builder(b) => (b.build(ctx), true),
    };
    normalize_enum_values(&mut property);
    ResolvedProperty { property, from_builder }
}

fn normalize_enum_values(property: &mut Property) {
    match &mut property.kind {
        PropertyKind::String(StringProperty { enum_values, .. })
        | PropertyKind::Number(NumberProperty { enum_values, .. }) => {
            if let Some(values @ EnumValues::Map(_)) = enum_values {
                *values = EnumValues::List(values.to_configs());
            }
        }
        PropertyKind::Array(array) => {
            if let Some(of) = array.of.as_deref_mut() {
                normalize_enum_values(of);
            }
            if let Some(one_of) = array.one_of.as_mut() {
                one_of.properties.values_mut().for_each(normalize_enum_values);
            }
        }
        PropertyKind::Map(map) => map.properties.values_mut().for_each(normalize_enum_values),
        PropertyKind::Boolean | PropertyKind::Date(_) | PropertyKind::Geopoint | PropertyKind::Reference(_) => {}
    }
}
