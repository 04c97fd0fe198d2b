//! Classifies a path into the chain of collection, entity and custom-view
//! entries it addresses.

use crate::paths::{combination_lengths, join_path, split_segments};
use crate::registry::get_by_path_or_alias;
use quire_model::{CollectionDefinition, EntityCustomView};
use tracing::debug;

/// One level of a resolved path. Entries borrow the definitions they point at.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEntry<'a> {
    Collection {
        /// Absolute path of the collection, e.g. `products/123/reviews`.
        path: String,
        collection: &'a CollectionDefinition,
    },
    Entity {
        entity_id: String,
        /// Absolute path of the owning collection.
        path: String,
        /// `path/entity_id`.
        full_path: String,
        parent_collection: &'a CollectionDefinition,
    },
    CustomView {
        /// Entity path followed by the view path.
        path: String,
        view: &'a EntityCustomView,
        parent_collection: &'a CollectionDefinition,
    },
}

impl NavigationEntry<'_> {
    pub fn path(&self) -> &str {
        match self {
            Self::Collection { path, .. } | Self::CustomView { path, .. } => path,
            Self::Entity { full_path, .. } => full_path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Collection { .. } => "collection",
            Self::Entity { .. } => "entity",
            Self::CustomView { .. } => "custom_view",
        }
    }
}

/// Resolves `path` against `collections`.
///
/// At each level the longest odd-length prefix naming a collection wins and
/// the rest of that level is not tried. A level with no match ends the chain
/// without error, and so do segments after an entity id that match neither a
/// custom view nor a subcollection.
pub fn navigation_entries_from_path<'a>(path: &str, collections: &'a [CollectionDefinition]) -> Vec<NavigationEntry<'a>> {
    let mut entries = Vec::new();
    collect_entries(&split_segments(path), collections, "", &mut entries);
    entries
}

fn collect_entries<'a>(
    segments: &[&str],
    collections: &'a [CollectionDefinition],
    prefix: &str,
    entries: &mut Vec<NavigationEntry<'a>>,
) {
    let Some((len, collection)) = combination_lengths(segments.len())
        .find_map(|len| get_by_path_or_alias(&segments[..len].join("/"), collections).map(|c| (len, c)))
    else {
        return;
    };

    let collection_path = join_path(prefix, collection.path_or_alias());
    entries.push(NavigationEntry::Collection {
        path: collection_path.clone(),
        collection,
    });

    let Some((entity_id, rest)) = segments[len..].split_first() else {
        return;
    };
    let full_path = format!("{collection_path}/{entity_id}");
    entries.push(NavigationEntry::Entity {
        entity_id: entity_id.to_string(),
        path: collection_path,
        full_path: full_path.clone(),
        parent_collection: collection,
    });
    if rest.is_empty() {
        return;
    }

    let rest_path = rest.join("/");
    if let Some(view) = collection.view(&rest_path) {
        entries.push(NavigationEntry::CustomView {
            path: format!("{full_path}/{}", view.path),
            view,
            parent_collection: collection,
        });
    } else if !collection.subcollections.is_empty() {
        collect_entries(rest, &collection.subcollections, &full_path, entries);
    } else {
        debug!("Dropping unmatched segments `{}` after {}", rest_path, full_path);
    }
}
