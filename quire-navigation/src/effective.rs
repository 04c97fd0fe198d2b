//! Effective collection definitions: the developer base with the user's
//! persisted partial and the runtime override handler layered on top.

use crate::error::NavigationResult;
use crate::paths::normalize;
use crate::registry::get_collection_by_path_or_alias;
use quire_model::{CollectionDefinition, CollectionOverrideHandler, UserConfigurationPersistence};
use tracing::debug;

/// Resolves the effective definition of the collection at `path_or_alias`.
///
/// Layers, later wins on the fields it defines:
/// 1. the base collection from `collections`
/// 2. the user's persisted partial for this path (when `user_persistence` is given)
/// 3. the override handler's partial for this path and entity
///
/// The handler layer is shallow: fields it sets replace the base's, and
/// `property_definitions` replaces the whole property map. Subcollections,
/// callbacks and permissions come from the base unless the handler result
/// sets them. Returns `Ok(None)` when there is neither a base
/// collection nor a handler result.
pub fn resolve_effective_collection(
    path_or_alias: &str,
    entity_id: Option<&str>,
    collections: &[CollectionDefinition],
    override_handler: Option<&dyn CollectionOverrideHandler>,
    user_persistence: Option<&dyn UserConfigurationPersistence>,
) -> NavigationResult<Option<CollectionDefinition>> {
    let path = normalize(path_or_alias);
    let mut base = get_collection_by_path_or_alias(path, collections)?.cloned();

    if let (Some(base), Some(persistence)) = (base.as_mut(), user_persistence) {
        if let Some(user_override) = persistence.get_collection_config(path) {
            debug!("Applying user configuration to {}", path);
            user_override.apply_to(base);
        }
    }

    let handler_result = override_handler.and_then(|handler| handler.override_collection(path, entity_id));

    Ok(match (base, handler_result) {
        (None, None) => None,
        (Some(base), None) => Some(base),
        (None, Some(result)) => {
            debug!("Override handler defined {} without a base collection", path);
            Some(result.into_collection(path))
        }
        (Some(mut base), Some(result)) => {
            result.apply_to(&mut base);
            Some(base)
        }
    })
}
