//! Flat top-level navigation derived from the loaded collections and views.

use crate::urls::NavigationUrls;
use quire_model::{CmsView, CollectionDefinition};
use serde::{Deserialize, Serialize};

/// What a top navigation entry links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TopNavigationTarget {
    /// A root collection, by path or alias.
    Collection { path: String },
    /// A CMS view, by its first path.
    View { path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopNavigationEntry {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(flatten)]
    pub target: TopNavigationTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopNavigationResult {
    pub navigation_entries: Vec<TopNavigationEntry>,
    /// Distinct non-empty groups in first-seen order.
    pub groups: Vec<String>,
}

/// Collections first, then views not hidden from navigation, in input order.
pub fn build_top_navigation(
    collections: &[CollectionDefinition],
    views: &[CmsView],
    urls: &NavigationUrls,
) -> TopNavigationResult {
    let collection_entries = collections.iter().map(|collection| {
        let path = collection.path_or_alias().to_string();
        TopNavigationEntry {
            url: urls.build_url_collection_path(&path),
            name: collection.name.trim().to_string(),
            description: trimmed(collection.description.as_deref()),
            group: trimmed(collection.group.as_deref()),
            target: TopNavigationTarget::Collection { path },
        }
    });
    let view_entries = views
        .iter()
        .filter(|view| !view.hide_from_navigation)
        .map(|view| {
            let path = view.primary_path().unwrap_or_default().to_string();
            TopNavigationEntry {
                url: urls.build_cms_url_path(&path),
                name: view.name.trim().to_string(),
                description: trimmed(view.description.as_deref()),
                group: trimmed(view.group.as_deref()),
                target: TopNavigationTarget::View { path },
            }
        });
    let navigation_entries: Vec<TopNavigationEntry> = collection_entries.chain(view_entries).collect();

    let mut groups: Vec<String> = Vec::new();
    for group in navigation_entries.iter().filter_map(|e| e.group.as_ref()) {
        if !groups.contains(group) {
            groups.push(group.clone());
        }
    }

    TopNavigationResult {
        navigation_entries,
        groups,
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}
