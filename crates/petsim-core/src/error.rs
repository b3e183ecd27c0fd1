//! Error types for storage, configuration and request-driven operations.

use thiserror::Error;

/// Errors that can occur while reading or writing pet/inventory storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Errors returned to the boundary layer by every request-driven operation.
///
/// The core only tags the failure; mapping to a transport status is the
/// caller's job.
#[derive(Debug, Error)]
pub enum CareError {
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: String },
    #[error("not enough of item {item_id} in inventory")]
    InsufficientQuantity { item_id: u32 },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CareError {
    pub fn not_found(what: &'static str, id: impl ToString) -> Self {
        CareError::NotFound {
            what,
            id: id.to_string(),
        }
    }
}

/// Errors loading or validating [`crate::config::SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
