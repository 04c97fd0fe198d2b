//! Data-source operations wrapped in a collection's [`EntityCallbacks`](quire_model::EntityCallbacks).

use crate::error::{DataSourceError, DataSourceResult};
use crate::source::{DataSource, SaveEntityRequest};
use quire_model::{CollectionDefinition, Entity, EntityValues, ResolvedCollection, SaveContext};
use tracing::{debug, warn};

/// Saves an entity, running `on_pre_save` first and `on_save_success` /
/// `on_save_failure` after.
///
/// A pre-save rejection is reported to `on_save_failure` and returned as
/// [`DataSourceError::Rejected`]; the data source is not called.
pub async fn save_entity_with_callbacks(
    data_source: &dyn DataSource,
    collection: &CollectionDefinition,
    request: SaveEntityRequest,
) -> DataSourceResult<Entity> {
    let Some(callbacks) = collection.callbacks.as_ref() else {
        return data_source.save_entity(request).await;
    };

    let SaveEntityRequest {
        path,
        entity_id,
        values,
        previous_values,
        status,
    } = request;
    let ctx = SaveContext {
        path: &path,
        entity_id: entity_id.as_deref(),
        status,
        previous_values: previous_values.as_ref(),
    };

    let values = match callbacks.on_pre_save(&ctx, values) {
        Ok(values) => values,
        Err(reason) => {
            warn!("Pre-save hook rejected {}: {}", path, reason);
            callbacks.on_save_failure(&ctx, &reason);
            return Err(DataSourceError::Rejected(reason));
        }
    };

    let request = SaveEntityRequest {
        path: path.clone(),
        entity_id: entity_id.clone(),
        values,
        previous_values: previous_values.clone(),
        status,
    };
    match data_source.save_entity(request).await {
        Ok(entity) => {
            callbacks.on_save_success(&ctx, &entity);
            Ok(entity)
        }
        Err(e) => {
            callbacks.on_save_failure(&ctx, &e.to_string());
            Err(e)
        }
    }
}

/// Deletes an entity unless `on_pre_delete` vetoes it, then runs `on_delete`.
pub async fn delete_entity_with_callbacks(
    data_source: &dyn DataSource,
    collection: &CollectionDefinition,
    entity: &Entity,
) -> DataSourceResult<()> {
    if let Some(callbacks) = collection.callbacks.as_ref() {
        callbacks.on_pre_delete(entity).map_err(DataSourceError::Rejected)?;
    }
    data_source.delete_entity(entity).await?;
    if let Some(callbacks) = collection.callbacks.as_ref() {
        callbacks.on_delete(entity);
    }
    Ok(())
}

/// Fetches an entity and passes it through `on_fetch`.
pub async fn fetch_entity_with_callbacks(
    data_source: &dyn DataSource,
    collection: &CollectionDefinition,
    path: &str,
    entity_id: &str,
) -> DataSourceResult<Option<Entity>> {
    let entity = data_source.fetch_entity(path, entity_id).await?;
    Ok(match (entity, collection.callbacks.as_ref()) {
        (Some(entity), Some(callbacks)) => Some(callbacks.on_fetch(entity)),
        (entity, _) => entity,
    })
}

/// Returns the keys of properties flagged unique whose value in `values` is
/// already held by another entity.
pub async fn check_unique_fields(
    data_source: &dyn DataSource,
    collection: &ResolvedCollection,
    values: &EntityValues,
    entity_id: Option<&str>,
) -> DataSourceResult<Vec<String>> {
    let mut conflicts = Vec::new();
    for (key, property) in &collection.properties {
        if !property.property.is_unique() {
            continue;
        }
        let Some(value) = values.get(key) else {
            continue;
        };
        let unique = data_source
            .check_unique_field(&collection.path, key, value, property, entity_id)
            .await?;
        if !unique {
            debug!("Unique check failed for {}.{}", collection.path, key);
            conflicts.push(key.clone());
        }
    }
    Ok(conflicts)
}
