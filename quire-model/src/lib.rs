//! Schema model for quire.
//!
//! Defines the types every other quire crate builds on:
//! - [`CollectionDefinition`]: a path-addressed set of entities sharing a schema,
//!   with nested subcollections and custom entity views
//! - [`Property`]: a typed field definition ([`PropertyKind`] is the sum type over
//!   data kinds), and [`ResolvedProperty`] once builders have been evaluated
//! - [`CollectionOverride`]: the typed partial used by override layers
//! - [`FieldBinding`]: the editor widget a resolved property maps to
//! - integrator hooks: [`EntityCallbacks`], [`CollectionOverrideHandler`],
//!   [`UserConfigurationPersistence`]
//!
//! The model does no I/O. Data access lives in
//! `quire-datasource`, path resolution in `quire-navigation`.

mod binding;
mod collection;
mod entity;
mod error;
mod handler;
mod overrides;
mod permissions;
mod property;

pub use binding::{FieldBinding, FieldSlot, bind_collection_fields, select_field_binding, table_column_width};
pub use collection::{Callbacks, CmsView, CollectionDefinition, EntityCustomView, ResolvedCollection, resolve_collection};
pub use entity::{Entity, EntityStatus, EntityValues, User};
pub use error::{ConfigError, ConfigResult};
pub use handler::{CollectionOverrideHandler, EntityCallbacks, SaveContext, UserConfigurationPersistence};
pub use overrides::{CollectionOverride, PropertyOverride};
pub use permissions::{Permissions, PermissionsBuilder, PermissionsConfig, PermissionsContext, resolve_permissions};
pub use property::{
    ArrayProperty, AutoValue, DateMode, DateProperty, EnumValueConfig, EnumValues, MapProperty, NumberProperty, OneOf,
    Property, PropertyBuilder, PropertyCommon, PropertyContext, PropertyKind, PropertyOrBuilder, PropertyValidation,
    ReferenceProperty, ResolvedProperty, StorageConfig, StringProperty, resolve_property,
};
