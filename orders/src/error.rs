//! Error types for the order service

use serde::Serialize;
use thiserror::Error;

use kingpin_storage::{EntityKind, ItemName, StorageError, UserName};

/// Result type for order operations
pub type OrderResult<T> = Result<T, OrderError>;

/// Order service error types
#[derive(Debug, Error)]
pub enum OrderError {
    /// A user or tournament name did not resolve
    #[error("{entity} not found: {name}")]
    NotFound {
        /// Kind of record that was looked up
        entity: EntityKind,
        /// Name that was looked up
        name: String,
    },

    /// The user does not meet the tournament's required proficiency
    #[error("{user} (proficiency {proficiency}) cannot enter {item} (requires {required})")]
    InsufficientProficiency {
        /// User placing the order
        user: UserName,
        /// Tournament being ordered
        item: ItemName,
        /// User's proficiency
        proficiency: u32,
        /// Tournament's required proficiency
        required: u32,
    },

    /// Creation with a name that is already taken
    #[error("{entity} already exists: {name}")]
    DuplicateName {
        /// Kind of record being created
        entity: EntityKind,
        /// Conflicting name
        name: String,
    },

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(StorageError),
}

/// Coarse classification used by transports to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Rejected,
    Conflict,
    Internal,
}

impl From<StorageError> for OrderError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, name } => OrderError::NotFound { entity, name },
            StorageError::DuplicateName { entity, name } => {
                OrderError::DuplicateName { entity, name }
            }
            other => OrderError::Storage(other),
        }
    }
}

impl OrderError {
    /// Check if error is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrderError::NotFound { .. })
    }

    /// Check if error is an eligibility rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, OrderError::InsufficientProficiency { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound { .. } => ErrorKind::NotFound,
            OrderError::InsufficientProficiency { .. } => ErrorKind::Rejected,
            OrderError::DuplicateName { .. } => ErrorKind::Conflict,
            OrderError::Storage(_) => ErrorKind::Internal,
        }
    }
}
