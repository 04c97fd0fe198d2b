//! Navigation and collection-path resolution for quire.
//!
//! Maps URL-like paths to the collections, entities and custom views they
//! address:
//! - [`paths`]: normalization and the odd-length path combinations
//! - registry lookup by path or alias, at one level or at any depth
//! - [`resolve_effective_collection`]: base definition with user and handler
//!   overrides layered on top
//! - [`navigation_entries_from_path`]: greedy resolution into a chain of
//!   [`NavigationEntry`] values
//! - [`build_top_navigation`] and [`NavigationUrls`]
//! - [`NavigationController`]: async loading of collections and views into an
//!   immutable [`NavigationSnapshot`]

mod config;
mod controller;
mod effective;
mod error;
pub mod paths;
mod registry;
mod resolver;
mod top_nav;
mod urls;

pub use config::{CmsConfig, NavigationConfig};
pub use controller::{
    CollectionsBuilder, CollectionsSource, NavigationController, NavigationSnapshot, ViewsBuilder, ViewsSource,
};
pub use effective::resolve_effective_collection;
pub use error::{NavigationError, NavigationResult};
pub use paths::{normalize, path_combinations, split_segments};
pub use registry::{get_by_path_or_alias, get_collection_by_path_or_alias, resolve_aliases};
pub use resolver::{NavigationEntry, navigation_entries_from_path};
pub use top_nav::{TopNavigationEntry, TopNavigationResult, TopNavigationTarget, build_top_navigation};
pub use urls::{NavigationUrls, encode_path, side_panel_key};
