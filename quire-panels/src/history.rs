//! The navigation history environment panels are mirrored into.

use serde::{Deserialize, Serialize};

/// State payload carried by history entries that panels pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Location the first panel was opened from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_location: Option<String>,
    /// Keys of the open panels, bottom first.
    #[serde(default)]
    pub panels: Vec<String>,
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub state: Option<HistoryState>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            state: None,
        }
    }

    /// The location panels were opened over: the stored `base_location`
    /// if any, else this location's path.
    pub fn base_location(&self) -> String {
        self.state
            .as_ref()
            .and_then(|state| state.base_location.clone())
            .unwrap_or_else(|| self.path.clone())
    }

    /// Panel keys in the state, empty without state.
    pub fn panel_keys(&self) -> &[String] {
        self.state.as_ref().map(|state| state.panels.as_slice()).unwrap_or_default()
    }
}

/// Browser-like history with arbitrary state per entry.
pub trait History {
    fn current(&self) -> &Location;

    fn push(&mut self, path: &str, state: HistoryState);

    fn replace(&mut self, path: &str, state: HistoryState);

    /// Moves one entry back. No-op at the first entry.
    fn back(&mut self);
}

/// History kept as an entry list and a cursor. Pushing drops forward entries.
#[derive(Debug, Clone)]
pub struct InMemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl InMemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: vec![Location::new(initial_path)],
            index: 0,
        }
    }

    /// Moves one entry forward. No-op at the last entry.
    pub fn forward(&mut self) {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
        }
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for InMemoryHistory {
    fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    fn push(&mut self, path: &str, state: HistoryState) {
        self.entries.truncate(self.index + 1);
        self.entries.push(Location {
            path: path.to_string(),
            state: Some(state),
        });
        self.index += 1;
    }

    fn replace(&mut self, path: &str, state: HistoryState) {
        self.entries[self.index] = Location {
            path: path.to_string(),
            state: Some(state),
        };
    }

    fn back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}
