use thiserror::Error;

use crate::types::EntityKind;

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Lookup miss for a user, tournament or order
    #[error("{entity} not found: {name}")]
    NotFound {
        /// Kind of record that was looked up
        entity: EntityKind,
        /// Name (or id) that was looked up
        name: String,
    },

    /// Creation with a name (or order id) that is already taken
    #[error("{entity} already exists: {name}")]
    DuplicateName {
        /// Kind of record being created
        entity: EntityKind,
        /// Conflicting name (or id)
        name: String,
    },

    /// Snapshot contents violate a store invariant
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Every order id up to `u64::MAX` has been handed out
    #[error("Order ids exhausted")]
    OrderIdsExhausted,

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    pub(crate) fn not_found(entity: EntityKind, name: impl ToString) -> Self {
        StorageError::NotFound {
            entity,
            name: name.to_string(),
        }
    }

    pub(crate) fn duplicate(entity: EntityKind, name: impl ToString) -> Self {
        StorageError::DuplicateName {
            entity,
            name: name.to_string(),
        }
    }

    /// Check if error is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for StorageError {
    fn from(err: serde_yaml::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
