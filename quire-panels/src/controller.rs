//! The side-panel stack.

use crate::history::{History, HistoryState};
use crate::panel::SidePanel;
use std::collections::HashMap;
use tracing::{debug, info};

/// Panels named by `keys`, in order. Keys missing from `lookup` are skipped.
pub fn derive_visible_panels(lookup: &HashMap<String, SidePanel>, keys: &[String]) -> Vec<SidePanel> {
    keys.iter()
        .filter_map(|key| {
            let panel = lookup.get(key);
            if panel.is_none() {
                debug!("Ignoring unknown side panel key {}", key);
            }
            panel.cloned()
        })
        .collect()
}

/// Ordered stack of open side panels, mirrored into a [`History`].
///
/// `open`, `replace` and `close` update the stack and issue the matching
/// history operation; when one is issued the stack is then re-derived from
/// the resulting history state, as [`on_history_change`](Self::on_history_change)
/// does for navigation the controller did not start. Every panel ever opened
/// stays in a lookup table so back/forward navigation can restore it.
#[derive(Debug)]
pub struct SidePanelController<H: History> {
    history: H,
    panels: Vec<SidePanel>,
    routes: HashMap<String, SidePanel>,
    /// History entries pushed by `open` and not yet undone by `close`.
    pushed: usize,
}

impl<H: History> SidePanelController<H> {
    pub fn new(history: H) -> Self {
        Self {
            history,
            panels: Vec::new(),
            routes: HashMap::new(),
            pushed: 0,
        }
    }

    /// Open panels, bottom first.
    pub fn panels(&self) -> &[SidePanel] {
        &self.panels
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access for driving navigation from outside; call
    /// [`on_history_change`](Self::on_history_change) afterwards.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// The last descriptor registered under `key`, open or not.
    pub fn registered(&self, key: &str) -> Option<&SidePanel> {
        self.routes.get(key)
    }

    /// Appends `panels` to the stack and pushes a history entry for each one
    /// that has a URL.
    pub fn open(&mut self, panels: impl IntoIterator<Item = SidePanel>) {
        let new_panels = self.register(panels);
        if new_panels.is_empty() {
            return;
        }
        self.panels.extend(new_panels.iter().cloned());
        info!("Opened side panels: {:?}", keys_of(&new_panels));

        let state = self.state_for(self.keys());
        let mut navigated = false;
        for url in new_panels.iter().filter_map(|p| p.url_path.as_deref()) {
            self.history.push(url, state.clone());
            self.pushed += 1;
            navigated = true;
        }
        if navigated {
            self.on_history_change();
        }
    }

    /// Replaces the last `panels.len()` panels with `panels`, replacing the
    /// current history entry instead of pushing.
    pub fn replace(&mut self, panels: impl IntoIterator<Item = SidePanel>) {
        let new_panels = self.register(panels);
        if new_panels.is_empty() {
            return;
        }
        let keep = self.panels.len().saturating_sub(new_panels.len());
        self.panels.truncate(keep);
        self.panels.extend(new_panels.iter().cloned());
        info!("Replaced side panels with {:?}", keys_of(&new_panels));

        let state = self.state_for(self.keys());
        let mut navigated = false;
        for url in new_panels.iter().filter_map(|p| p.url_path.as_deref()) {
            self.history.replace(url, state.clone());
            navigated = true;
        }
        if navigated {
            self.on_history_change();
        }
    }

    /// Closes the top panel. No-op on an empty stack.
    ///
    /// A panel whose URL was pushed goes back one history entry. Otherwise
    /// a panel with a parent URL replaces the current entry with it.
    pub fn close(&mut self) {
        let Some(last) = self.panels.pop() else {
            return;
        };
        info!("Closed side panel {}", last.key);

        if last.url_path.is_some() && self.pushed > 0 {
            self.pushed -= 1;
            self.history.back();
            self.on_history_change();
        } else if let Some(parent) = &last.parent_url_path {
            let state = self.state_for(self.keys());
            self.history.replace(parent, state);
            self.on_history_change();
        }
    }

    /// Re-derives the stack from the current history state.
    pub fn on_history_change(&mut self) {
        self.panels = derive_visible_panels(&self.routes, self.history.current().panel_keys());
        debug!("Side panels now {:?}", self.keys());
    }

    fn register(&mut self, panels: impl IntoIterator<Item = SidePanel>) -> Vec<SidePanel> {
        let panels: Vec<SidePanel> = panels.into_iter().collect();
        for panel in &panels {
            self.routes.insert(panel.key.clone(), panel.clone());
        }
        panels
    }

    fn keys(&self) -> Vec<String> {
        keys_of(&self.panels)
    }

    fn state_for(&self, panels: Vec<String>) -> HistoryState {
        HistoryState {
            base_location: Some(self.history.current().base_location()),
            panels,
        }
    }
}

fn keys_of(panels: &[SidePanel]) -> Vec<String> {
    panels.iter().map(|p| p.key.clone()).collect()
}
