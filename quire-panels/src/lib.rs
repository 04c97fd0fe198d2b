//! Side panels for quire.
//!
//! A [`SidePanelController`] owns the stack of open editor panels and mirrors
//! it into a [`History`] environment. History state is authoritative: after
//! every navigation the visible stack is re-derived from the state's panel
//! keys with [`derive_visible_panels`].

mod controller;
mod entity;
mod history;
mod panel;

pub use controller::{SidePanelController, derive_visible_panels};
pub use entity::{EntityPanelRequest, build_entity_panel};
pub use history::{History, HistoryState, InMemoryHistory, Location};
pub use panel::SidePanel;
