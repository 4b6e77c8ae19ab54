use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors surfaced by the persistence collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced by the remote user directory.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Remote responded with status {0}")]
    Status(u16),
    #[error("User not found on remote")]
    NotFound,
}

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(u32),
    #[error("User validation error: {0}")]
    ValidationError(FieldErrors),
    #[error("User storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors raised while establishing the initial user list at startup.
///
/// All variants are recoverable: the service keeps running with an empty
/// list and the caller decides what to show the user.
#[derive(Debug, Error)]
pub enum HydrateError {
    #[error("Failed to read persisted users: {0}")]
    Storage(#[from] StorageError),
    #[error("Persisted user list is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("Failed to fetch users: {0}")]
    Fetch(#[from] FetchError),
    #[error("User service unavailable: {0}")]
    Service(#[from] UserError),
}
