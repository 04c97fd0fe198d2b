use serde::{Deserialize, Serialize};

/// Field values of an entity, keyed by property key.
pub type EntityValues = serde_json::Map<String, serde_json::Value>;

/// One record within a collection.
///
/// `path` is the data path of the owning collection (e.g. `products/123/reviews`),
/// so `path/id` addresses the entity itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub values: EntityValues,
}

impl Entity {
    pub fn new(id: impl Into<String>, path: impl Into<String>, values: EntityValues) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            values,
        }
    }

    /// Full data path of this entity (`collection/id`).
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.path, self.id)
    }

    /// Extract a string value using a JSON pointer into the values (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.pointer(pointer).and_then(|v| v.as_f64())
    }

    fn pointer(&self, pointer: &str) -> Option<&serde_json::Value> {
        let trimmed = pointer.strip_prefix('/').unwrap_or(pointer);
        let (head, rest) = match trimmed.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (trimmed, None),
        };
        let value = self.values.get(head)?;
        match rest {
            Some(rest) => value.pointer(&format!("/{rest}")),
            None => Some(value),
        }
    }
}

/// Whether a save creates, updates or duplicates an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    New,
    Existing,
    Copy,
}

/// The signed-in user as seen by permission builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
