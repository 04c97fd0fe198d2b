//! Error types for path resolution.

use thiserror::Error;

/// Result type for navigation operations.
pub type NavigationResult<T> = Result<T, NavigationError>;

/// Errors raised while resolving paths against the collection registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Collections have not been loaded yet.
    #[error("collections have not been initialised yet")]
    NotInitialised,

    /// No collection matches at some level of the path.
    #[error("no collection matches `{segment}` resolving {path}")]
    CollectionNotFound { path: String, segment: String },

    /// Collection paths alternate collection/entity and must have an odd segment count.
    #[error("collection paths must have an odd number of segments: {0}")]
    EvenSegmentCount(String),

    /// URL is outside the collection URL prefix.
    #[error("expected path starting with {expected}: {path}")]
    PathPrefixMismatch { path: String, expected: String },

    /// A collection or view builder failed.
    #[error("navigation builder failed: {0}")]
    Builder(String),
}
