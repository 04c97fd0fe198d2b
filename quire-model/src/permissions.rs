//! Collection permissions.

use crate::collection::CollectionDefinition;
use crate::entity::User;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// What the current user may do with a collection's entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub read: bool,
    pub edit: bool,
    pub create: bool,
    pub delete: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            read: true,
            edit: true,
            create: true,
            delete: true,
        }
    }
}

impl Permissions {
    pub fn read_only() -> Self {
        Self {
            read: true,
            edit: false,
            create: false,
            delete: false,
        }
    }
}

/// Inputs available to a [`PermissionsBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct PermissionsContext<'a> {
    pub user: Option<&'a User>,
    pub path: &'a str,
    pub entity_id: Option<&'a str>,
    pub collection: &'a CollectionDefinition,
}

type PermissionsFn = dyn Fn(&PermissionsContext<'_>) -> Permissions + Send + Sync;

/// Permissions computed from the user and the entity being accessed.
#[derive(Clone)]
pub struct PermissionsBuilder(Arc<PermissionsFn>);

impl PermissionsBuilder {
    pub fn new(f: impl Fn(&PermissionsContext<'_>) -> Permissions + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn build(&self, ctx: &PermissionsContext<'_>) -> Permissions {
        (self.0)(ctx)
    }
}

impl fmt::Debug for PermissionsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PermissionsBuilder(..)")
    }
}

impl PartialEq for PermissionsBuilder {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Permissions as declared on a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum PermissionsConfig {
    Static(Permissions),
    Builder(PermissionsBuilder),
}

impl Serialize for PermissionsConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Static(permissions) => permissions.serialize(serializer),
            Self::Builder(_) => Err(serde::ser::Error::custom("permission builders cannot be serialized")),
        }
    }
}

impl<'de> Deserialize<'de> for PermissionsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Permissions::deserialize(deserializer).map(Self::Static)
    }
}

/// Effective permissions for `collection` at `path`.
///
/// Collections without a permissions config grant everything.
pub fn resolve_permissions(
    collection: &CollectionDefinition,
    user: Option<&User>,
    path: &str,
    entity_id: Option<&str>,
) -> Permissions {
    match &collection.permissions {
        None => Permissions::default(),
        Some(PermissionsConfig::Static(permissions)) => *permissions,
        Some(PermissionsConfig::Builder(builder)) => builder.build(&PermissionsContext {
            user,
            path,
            entity_id,
            collection,
        }),
    }
}
