//! Error types
//!
//! `GameError` covers programmer errors at the action boundary. Storage
//! failures live in `StorageError` and never reach the reducer.

use thiserror::Error;

/// Errors surfaced by the reducer
#[derive(Debug, Error)]
pub enum GameError {
    /// Unknown action tag. Indicates a bug in the caller.
    #[error("invalid action {0}")]
    InvalidAction(u8),

    /// Known action whose payload is missing or malformed
    #[error("invalid payload for {action}: {reason}")]
    InvalidPayload {
        action: &'static str,
        reason: String,
    },
}

/// Errors from a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend could not be reached (e.g. LocalStorage disabled)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
