//! Error types for the data-source layer.

use thiserror::Error;

/// Result type for data-source operations.
pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// Errors that can occur talking to a data, storage or auth backend.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Entity does not exist.
    #[error("entity not found: {path}/{entity_id}")]
    NotFound { path: String, entity_id: String },

    /// Backend cannot be reached.
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    /// A callback vetoed the operation.
    #[error("rejected by callback: {0}")]
    Rejected(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upload exceeds the property's max size.
    #[error("file too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    /// Upload type not in the property's accepted files.
    #[error("file type not accepted: {file_name}")]
    UnacceptedFile { file_name: String },

    /// No signed-in user.
    #[error("not authenticated")]
    Unauthenticated,
}
