//! Configuration errors raised while binding properties to editors.

use thiserror::Error;

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A property definition that cannot be rendered as declared.
///
/// These are reported per field: a collection with one broken property still
/// binds all of its other properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Array property with neither `of` nor `oneOf`.
    #[error("array property `{property}` must declare `of` or `oneOf`")]
    MissingArrayOf { property: String },

    /// Enum-typed property whose enum values are empty.
    #[error("property `{property}` declares an enum without enum values")]
    MissingEnumValues { property: String },

    /// Storage configuration that cannot be used for uploads.
    #[error("invalid storage config on `{property}`: {reason}")]
    MalformedStorage { property: String, reason: String },
}
