//! Commands of the `quire` inspector.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use quire_datasource::{MemoryUserConfigPersistence, StaticAuthController};
use quire_model::{CollectionDefinition, EntityValues, FieldBinding, bind_collection_fields, resolve_collection, table_column_width};
use quire_navigation::{
    CmsConfig, CollectionsSource, NavigationController, NavigationEntry, NavigationSnapshot, ViewsSource,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(about = "Inspect how a quire CMS config resolves paths")]
pub struct Args {
    /// Path to the CMS config (JSON)
    #[arg(short, long, default_value = "cms.json")]
    pub config: PathBuf,

    /// Per-user collection settings (JSON), applied to `collection` and `fields`
    #[arg(long)]
    pub user_config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a path into collection, entity and custom-view entries
    Resolve { path: String },
    /// Replace aliases in a path with canonical collection paths
    Aliases { path: String },
    /// Print the top-level navigation and its groups
    TopNav,
    /// Print the effective definition of a collection
    Collection {
        path: String,
        #[arg(long)]
        entity_id: Option<String>,
    },
    /// Print the editor binding and column width of each property
    Fields {
        path: String,
        #[arg(long)]
        entity_id: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntrySummary {
    #[serde(rename = "type")]
    kind: &'static str,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,
}

impl From<&NavigationEntry<'_>> for EntrySummary {
    fn from(entry: &NavigationEntry<'_>) -> Self {
        let (name, entity_id) = match entry {
            NavigationEntry::Collection { collection, .. } => (Some(collection.name.clone()), None),
            NavigationEntry::Entity { entity_id, .. } => (None, Some(entity_id.clone())),
            NavigationEntry::CustomView { view, .. } => (Some(view.name.clone()), None),
        };
        Self {
            kind: entry.kind(),
            path: entry.path().to_string(),
            name,
            entity_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldSummary {
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    binding: Option<FieldBinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    column_width: u32,
}

/// Reads a CMS config from a JSON file.
pub fn load_config(path: &Path) -> Result<CmsConfig> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    CmsConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

fn load_user_config(path: &Path) -> Result<MemoryUserConfigPersistence> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    MemoryUserConfigPersistence::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

/// Runs `args.command` and returns what to print.
pub async fn run(args: &Args) -> Result<String> {
    let config = load_config(&args.config)?;
    info!(
        "Loaded {} collections and {} views from {}",
        config.collections.len(),
        config.views.len(),
        args.config.display()
    );

    let mut controller = NavigationController::new(
        &config.navigation,
        Arc::new(StaticAuthController::new(None)),
        CollectionsSource::Static(config.collections),
        ViewsSource::Static(config.views),
    );
    let include_user_override = match &args.user_config {
        Some(path) => {
            controller = controller.with_user_persistence(Arc::new(load_user_config(path)?));
            true
        }
        None => false,
    };
    controller.refresh().await.context("loading navigation")?;
    let snapshot = controller.snapshot().await?;

    match &args.command {
        Command::Resolve { path } => {
            let entries: Vec<EntrySummary> = snapshot.navigation_entries(path).iter().map(EntrySummary::from).collect();
            debug!("{} resolved to {} entries", path, entries.len());
            Ok(serde_json::to_string_pretty(&entries)?)
        }
        Command::Aliases { path } => Ok(snapshot.resolve_aliases(path)?),
        Command::TopNav => Ok(serde_json::to_string_pretty(snapshot.top_navigation())?),
        Command::Collection { path, entity_id } => {
            let collection = effective(&snapshot, path, entity_id.as_deref(), include_user_override)?;
            Ok(serde_json::to_string_pretty(&collection)?)
        }
        Command::Fields { path, entity_id } => {
            let collection = effective(&snapshot, path, entity_id.as_deref(), include_user_override)?;
            let resolved = resolve_collection(&collection, path, entity_id.as_deref(), &EntityValues::new());
            let fields: Vec<FieldSummary> = bind_collection_fields(&resolved)
                .into_iter()
                .map(|slot| {
                    let column_width = resolved.properties.get(&slot.key).map_or(0, table_column_width);
                    let (binding, error) = match slot.binding {
                        Ok(binding) => (Some(binding), None),
                        Err(e) => (None, Some(e.to_string())),
                    };
                    FieldSummary {
                        key: slot.key,
                        binding,
                        error,
                        column_width,
                    }
                })
                .collect();
            Ok(serde_json::to_string_pretty(&fields)?)
        }
    }
}

fn effective(
    snapshot: &NavigationSnapshot,
    path: &str,
    entity_id: Option<&str>,
    include_user_override: bool,
) -> Result<CollectionDefinition> {
    match snapshot.get_collection(path, entity_id, include_user_override)? {
        Some(collection) => Ok(collection),
        None => bail!("no collection at {path}"),
    }
}
