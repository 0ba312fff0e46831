//! Error types for the value model

/// Errors raised by value access and conversion
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// Keyed access on a scalar
    #[error("expected a record or sequence, got {0}")]
    NotAContainer(&'static str),

    /// Named key used against a sequence
    #[error("key '{0}' does not address a sequence slot")]
    NonIndexKey(String),

    /// Sequence slot past [`crate::MAX_INDEX`] or too large to allocate
    #[error("sequence index {0} is out of range")]
    IndexOutOfRange(usize),

    /// Value cannot be used as a key
    #[error("invalid key: {0} (must be a string or a non-negative integer)")]
    InvalidKey(String),

    /// JSON parse or encode failure
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse failure
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
