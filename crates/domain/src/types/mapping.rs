//! Sync mapping between a local event and its remote counterpart

use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_SYNC_ERROR;
use crate::types::sync::SyncResult;

/// Synchronization state of one local event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncStatus {
    Pending,
    Synced,
    Failed,
}

storage_strings!(SyncStatus, "sync status" {
    Pending => "pending",
    Synced => "synced",
    Failed => "failed",
});

/// Persisted correspondence between a local event and a remote object.
///
/// Invariants, upheld by [`SyncMapping::apply`]:
/// - `remote_object_id` is set if and only if `status` is `Synced`
/// - `last_error` is set and non-empty if and only if `status` is `Failed`
/// - `last_remote_object_id` holds the newest remote id ever confirmed and
///   survives `Pending` and `Failed`, so retries target the same remote object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMapping {
    pub local_event_id: String,
    pub remote_object_id: Option<String>,
    pub status: SyncStatus,
    /// Unix timestamp (seconds) of the latest sync attempt
    pub last_attempt_at: i64,
    pub last_error: Option<String>,
    #[serde(default)]
    pub last_remote_object_id: Option<String>,
}

impl SyncMapping {
    /// Fresh mapping for an event whose first sync attempt is starting.
    pub fn pending(local_event_id: impl Into<String>, now: i64) -> Self {
        Self {
            local_event_id: local_event_id.into(),
            remote_object_id: None,
            status: SyncStatus::Pending,
            last_attempt_at: now,
            last_error: None,
            last_remote_object_id: None,
        }
    }

    /// Merge an update in place and stamp the attempt time.
    pub fn apply(&mut self, update: MappingUpdate, now: i64) {
        match update {
            MappingUpdate::Pending => {
                self.status = SyncStatus::Pending;
                self.remote_object_id = None;
                self.last_error = None;
            }
            MappingUpdate::Synced { remote_object_id } => {
                self.status = SyncStatus::Synced;
                self.last_remote_object_id = Some(remote_object_id.clone());
                self.remote_object_id = Some(remote_object_id);
                self.last_error = None;
            }
            MappingUpdate::Failed { error } => {
                self.status = SyncStatus::Failed;
                self.remote_object_id = None;
                self.last_error = Some(error);
            }
        }
        self.last_attempt_at = now;
    }

    pub fn is_synced(&self) -> bool {
        self.status == SyncStatus::Synced
    }

    /// Remote object this event is mirrored to, even after a failed attempt.
    pub fn known_remote_id(&self) -> Option<&str> {
        self.remote_object_id.as_deref().or(self.last_remote_object_id.as_deref())
    }
}

/// Field changes accepted by the mapping store's upsert.
///
/// Each variant carries exactly the data its status requires, so a mapping
/// built through [`SyncMapping::apply`] cannot break its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingUpdate {
    Pending,
    Synced { remote_object_id: String },
    Failed { error: String },
}

impl MappingUpdate {
    pub fn synced(remote_object_id: impl Into<String>) -> Self {
        Self::Synced { remote_object_id: remote_object_id.into() }
    }

    /// Failure update; blank messages are replaced with a generic one.
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() { UNKNOWN_SYNC_ERROR.to_string() } else { error };
        Self::Failed { error }
    }

    /// Terminal update for a strategy outcome.
    ///
    /// A successful result without a remote id cannot be stored as `Synced`;
    /// callers resolve a reference id before converting (see the coordinator).
    pub fn from_result(result: &SyncResult) -> Self {
        match (result.success, result.remote_object_id.as_deref()) {
            (true, Some(remote_id)) if !remote_id.is_empty() => Self::synced(remote_id),
            (true, _) => Self::failed("remote sync succeeded without a remote object id"),
            (false, _) => Self::failed(result.error.clone().unwrap_or_default()),
        }
    }

    pub fn status(&self) -> SyncStatus {
        match self {
            Self::Pending => SyncStatus::Pending,
            Self::Synced { .. } => SyncStatus::Synced,
            Self::Failed { .. } => SyncStatus::Failed,
        }
    }
}
