use serde::{Deserialize, Serialize};

/// Descriptor of one stacked editor panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePanel {
    /// Stable identity, `path[/entity_id]`.
    pub key: String,
    /// URL pushed to history when the panel opens. Panels without one live
    /// in memory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
    /// URL to return to when the panel closes without a history entry of its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_url_path: Option<String>,
    /// CSS width, e.g. `55vw`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl SidePanel {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url_path: None,
            parent_url_path: None,
            width: None,
        }
    }

    pub fn with_url_path(mut self, url_path: impl Into<String>) -> Self {
        self.url_path = Some(url_path.into());
        self
    }

    pub fn with_parent_url_path(mut self, parent_url_path: impl Into<String>) -> Self {
        self.parent_url_path = Some(parent_url_path.into());
        self
    }

    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }
}
