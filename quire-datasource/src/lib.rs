//! Collaborators the quire core talks to, behind narrow traits.
//!
//! - [`DataSource`]: fetch, listen, save and delete entities
//! - [`StorageSource`]: file uploads backing storage-enabled string properties
//! - [`AuthController`]: the signed-in user, consumed read-only
//! - [`UserConfigurationPersistence`](quire_model::UserConfigurationPersistence):
//!   per-user collection tweaks
//!
//! Each trait ships with an in-memory implementation used by tests and the
//! CLI. Backends for real databases live outside this workspace.

mod auth;
mod callbacks;
mod error;
mod memory;
mod query;
mod source;
mod storage;
mod user_config;

pub use auth::{AuthController, StaticAuthController};
pub use callbacks::{check_unique_fields, delete_entity_with_callbacks, fetch_entity_with_callbacks, save_entity_with_callbacks};
pub use error::{DataSourceError, DataSourceResult};
pub use memory::MemoryDataSource;
pub use query::{CollectionQuery, FilterValues, SortOrder, WhereOp, compare_values};
pub use source::{CollectionListener, DataSource, EntityListener, SaveEntityRequest, Subscription};
pub use storage::{DownloadConfig, FileMetadata, FileUpload, MemoryStorageSource, StorageSource, UploadedFile, check_upload};
pub use user_config::MemoryUserConfigPersistence;
