use crate::entity::{Entity, EntityStatus, EntityValues};
use crate::overrides::CollectionOverride;

/// Describes the save an [`EntityCallbacks`] hook is running for.
#[derive(Debug, Clone, Copy)]
pub struct SaveContext<'a> {
    /// Data path of the collection.
    pub path: &'a str,
    /// `None` for entities that have not been assigned an id yet.
    pub entity_id: Option<&'a str>,
    pub status: EntityStatus,
    pub previous_values: Option<&'a EntityValues>,
}

/// Optional hooks a collection can run around data-source operations.
///
/// Every hook has a no-op default; implement only what you need:
/// - Input validation or value rewriting before a save
/// - Side effects after a successful save or delete
/// - Post-fetch enrichment (e.g., computing derived fields)
pub trait EntityCallbacks: Send + Sync {
    /// Called before values are written. Return `Err(message)` to reject the save,
    /// or return rewritten values.
    fn on_pre_save(&self, ctx: &SaveContext<'_>, values: EntityValues) -> Result<EntityValues, String> {
        let _ = ctx;
        Ok(values)
    }

    fn on_save_success(&self, ctx: &SaveContext<'_>, entity: &Entity) {
        let _ = (ctx, entity);
    }

    fn on_save_failure(&self, ctx: &SaveContext<'_>, error: &str) {
        let _ = (ctx, error);
    }

    /// Return `Err(message)` to veto the deletion.
    fn on_pre_delete(&self, entity: &Entity) -> Result<(), String> {
        let _ = entity;
        Ok(())
    }

    fn on_delete(&self, entity: &Entity) {
        let _ = entity;
    }

    /// Called after loading an entity, before returning it to the caller.
    fn on_fetch(&self, entity: Entity) -> Entity {
        entity
    }
}

/// Integrator hook that replaces or augments a collection's effective
/// definition per path and entity.
///
/// Returning `None` leaves the collection as configured. Any closure of the
/// right shape implements this trait.
pub trait CollectionOverrideHandler: Send + Sync {
    fn override_collection(&self, path: &str, entity_id: Option<&str>) -> Option<CollectionOverride>;
}

impl<F> CollectionOverrideHandler for F
where
    F: Fn(&str, Option<&str>) -> Option<CollectionOverride> + Send + Sync,
{
    fn override_collection(&self, path: &str, entity_id: Option<&str>) -> Option<CollectionOverride> {
        self(path, entity_id)
    }
}

/// Per-user collection settings (column widths, hidden columns, ...),
/// persisted outside the developer-defined schema.
pub trait UserConfigurationPersistence: Send + Sync {
    /// The stored partial override for `path`, if any.
    fn get_collection_config(&self, path: &str) -> Option<CollectionOverride>;

    /// Records a user modification; implementations merge it into what is stored.
    fn on_collection_modified(&self, path: &str, partial: CollectionOverride);
}
