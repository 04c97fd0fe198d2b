//! Side panels for entity editors.

use crate::panel::SidePanel;
use quire_navigation::{NavigationUrls, normalize, side_panel_key};

/// Request to edit (or create) an entity in a side panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityPanelRequest {
    /// Data path of the collection, e.g. `products/123/reviews`.
    pub path: String,
    /// `None` opens the form for a new entity.
    pub entity_id: Option<String>,
    /// Custom view or subcollection to select inside the panel.
    pub selected_sub_path: Option<String>,
    /// Open a copy of the entity instead of the entity itself.
    pub copy: bool,
    pub width: Option<String>,
}

impl EntityPanelRequest {
    pub fn new(path: impl Into<String>, entity_id: Option<&str>) -> Self {
        Self {
            path: path.into(),
            entity_id: entity_id.map(str::to_string),
            ..Default::default()
        }
    }
}

/// Builds the panel descriptor for `request`.
///
/// The panel URL addresses the entity (plus sub-path), or the collection with
/// `#new` for new entities; its parent URL is the collection.
pub fn build_entity_panel(urls: &NavigationUrls, request: &EntityPanelRequest) -> SidePanel {
    let path = normalize(&request.path);
    let collection_url = urls.build_url_collection_path(path);
    let url_path = match &request.entity_id {
        None => format!("{collection_url}#new"),
        Some(entity_id) => {
            let mut entity_path = format!("{}/{}", path, normalize(entity_id));
            if let Some(sub_path) = &request.selected_sub_path {
                entity_path.push('/');
                entity_path.push_str(normalize(sub_path));
            }
            let url = urls.build_url_collection_path(&entity_path);
            if request.copy { format!("{url}#copy") } else { url }
        }
    };

    SidePanel {
        key: side_panel_key(path, request.entity_id.as_deref()),
        url_path: Some(url_path),
        parent_url_path: Some(collection_url),
        width: request.width.clone(),
    }
}
