//! Foreign error mapping for the storage and HTTP adapters.
//!
//! SQLite lock contention and an exhausted connection pool surface as
//! `EventSyncError::StoreBusy`, which `should_retry()` treats as transient.
//! Every other storage failure is a plain `Database` error. HTTP failures are
//! stripped of their URL first, since query strings carry contact emails and
//! phone numbers.

use eventsync_domain::EventSyncError;
use rusqlite::ffi::ErrorCode;

/// Domain error produced on the infrastructure side of a conversion.
#[derive(Debug)]
pub struct InfraError(pub EventSyncError);

impl From<InfraError> for EventSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<rusqlite::Error> for InfraError {
    fn from(err: rusqlite::Error) -> Self {
        let mapped = match &err {
            rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                    EventSyncError::StoreBusy(err.to_string())
                }
                ErrorCode::ConstraintViolation => {
                    EventSyncError::Database(format!("sync mapping rejected by schema: {err}"))
                }
                _ => EventSyncError::Database(err.to_string()),
            },
            rusqlite::Error::FromSqlConversionFailure(column, _, cause) => {
                EventSyncError::Database(format!("unreadable sync mapping column {column}: {cause}"))
            }
            _ => EventSyncError::Database(err.to_string()),
        };
        Self(mapped)
    }
}

/// Only raised by `Pool::get` once the checkout timeout has passed.
impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        Self(EventSyncError::StoreBusy(format!("no pooled connection available: {err}")))
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        let mapped = if err.is_builder() {
            EventSyncError::Internal(format!("invalid HTTP request: {err}"))
        } else if err.is_timeout() {
            EventSyncError::Transport("request timed out".into())
        } else if err.is_connect() {
            EventSyncError::Transport(format!("connection failed: {err}"))
        } else if let Some(status) = err.status() {
            EventSyncError::RemoteApi {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else {
            EventSyncError::Transport(err.to_string())
        };
        Self(mapped)
    }
}
