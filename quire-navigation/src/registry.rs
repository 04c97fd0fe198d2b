//! Collection lookup by path or alias.

use crate::error::{NavigationError, NavigationResult};
use crate::paths::{combination_lengths, normalize, split_segments};
use quire_model::CollectionDefinition;

/// Exact match of `key` against `path` or `alias` at a single level.
pub fn get_by_path_or_alias<'a>(key: &str, collections: &'a [CollectionDefinition]) -> Option<&'a CollectionDefinition> {
    collections.iter().find(|c| c.matches(key))
}

/// Finds the collection addressed by a full data path at any depth,
/// e.g. `products/123/reviews`.
///
/// Returns `Ok(None)` when nothing matches; an even segment count is an error.
pub fn get_collection_by_path_or_alias<'a>(
    path: &str,
    collections: &'a [CollectionDefinition],
) -> NavigationResult<Option<&'a CollectionDefinition>> {
    let segments = split_segments(path);
    if segments.len() % 2 == 0 && !segments.is_empty() {
        return Err(NavigationError::EvenSegmentCount(normalize(path).to_string()));
    }
    Ok(find_nested(&segments, collections))
}

fn find_nested<'a>(segments: &[&str], collections: &'a [CollectionDefinition]) -> Option<&'a CollectionDefinition> {
    for len in combination_lengths(segments.len()) {
        let Some(collection) = get_by_path_or_alias(&segments[..len].join("/"), collections) else {
            continue;
        };
        if len == segments.len() {
            return Some(collection);
        }
        // Skip the entity id between this collection and the next level.
        let rest = &segments[len + 1..];
        if !rest.is_empty() {
            if let Some(found) = find_nested(rest, &collection.subcollections) {
                return Some(found);
            }
        }
    }
    None
}

/// Rewrites every alias in `path` to the canonical collection path, descending
/// into subcollections. Entity ids pass through unchanged.
///
/// Fails with [`NavigationError::CollectionNotFound`] as soon as a level has
/// no matching collection.
pub fn resolve_aliases(path: &str, collections: &[CollectionDefinition]) -> NavigationResult<String> {
    let segments = split_segments(path);
    if segments.is_empty() {
        return Ok(String::new());
    }
    resolve_segments(&segments, collections)
}

fn resolve_segments(segments: &[&str], collections: &[CollectionDefinition]) -> NavigationResult<String> {
    for len in combination_lengths(segments.len()) {
        let Some(collection) = get_by_path_or_alias(&segments[..len].join("/"), collections) else {
            continue;
        };
        let mut resolved = collection.path.clone();
        if let Some((entity_id, rest)) = segments[len..].split_first() {
            resolved.push('/');
            resolved.push_str(entity_id);
            if !rest.is_empty() {
                resolved.push('/');
                resolved.push_str(&resolve_segments(rest, &collection.subcollections)?);
            }
        }
        return Ok(resolved);
    }
    Err(NavigationError::CollectionNotFound {
        path: segments.join("/"),
        segment: segments[0].to_string(),
    })
}
