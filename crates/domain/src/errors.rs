//! Error types used throughout the sync subsystem

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories of sync errors for retry decisions surfaced to the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncErrorCategory {
    /// No remote contact matches the client - non-retryable
    ContactNotFound,
    /// Authentication errors (401, 403) - retry after credentials are fixed
    Authentication,
    /// Rate limiting errors (429) - retry with backoff
    RateLimit,
    /// Server errors (5xx) - retryable
    Server,
    /// Client errors (4xx except auth) - non-retryable
    Client,
    /// Network/connection errors - retryable
    Network,
    /// Local store contention or pool exhaustion - retryable
    StoreBusy,
    /// Other local store errors - non-retryable
    Database,
    /// Configuration errors - non-retryable
    Config,
}

/// Main error type for the sync subsystem
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum EventSyncError {
    #[error("contact not found")]
    ContactNotFound,

    #[error("remote API error (HTTP {status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("mapping store busy: {0}")]
    StoreBusy(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl EventSyncError {
    /// Get the error category for this error
    pub fn category(&self) -> SyncErrorCategory {
        match self {
            Self::ContactNotFound => SyncErrorCategory::ContactNotFound,
            Self::RemoteApi { status, .. } => match status {
                401 | 403 => SyncErrorCategory::Authentication,
                429 => SyncErrorCategory::RateLimit,
                500..=599 => SyncErrorCategory::Server,
                _ => SyncErrorCategory::Client,
            },
            Self::Transport(_) => SyncErrorCategory::Network,
            Self::StoreBusy(_) => SyncErrorCategory::StoreBusy,
            Self::Database(_) => SyncErrorCategory::Database,
            Self::Config(_) => SyncErrorCategory::Config,
            Self::InvalidInput(_) => SyncErrorCategory::Client,
            Self::Internal(_) => SyncErrorCategory::Server,
        }
    }

    /// Check if re-invoking the same lifecycle operation may succeed
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            SyncErrorCategory::RateLimit
                | SyncErrorCategory::Server
                | SyncErrorCategory::Network
                | SyncErrorCategory::StoreBusy
        )
    }
}

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, EventSyncError>;
