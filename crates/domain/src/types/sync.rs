//! Values exchanged with the host application

use serde::{Deserialize, Serialize};

use crate::types::mapping::{SyncMapping, SyncStatus};

/// Lifecycle transition that triggered a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleKind {
    Created,
    Updated,
    Deleted,
}

storage_strings!(LifecycleKind, "lifecycle kind" {
    Created => "created",
    Updated => "updated",
    Deleted => "deleted",
});

/// Outcome of a single sync operation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success: bool,
    pub remote_object_id: Option<String>,
    pub error: Option<String>,
}

impl SyncResult {
    pub fn synced(remote_object_id: impl Into<String>) -> Self {
        Self { success: true, remote_object_id: Some(remote_object_id.into()), error: None }
    }

    /// Success that carries no remote id (e.g. a webhook with an empty body).
    pub fn dispatched(remote_object_id: Option<String>) -> Self {
        Self { success: true, remote_object_id, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, remote_object_id: None, error: Some(error.into()) }
    }
}

/// Sync indicator data for one event, as read by the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusReport {
    pub synced: bool,
    /// `None` when the event was never synced (no mapping stored)
    pub status: Option<SyncStatus>,
    pub error: Option<String>,
    pub remote_object_id: Option<String>,
    pub last_attempt_at: Option<i64>,
}

impl SyncStatusReport {
    pub fn untracked() -> Self {
        Self {
            synced: false,
            status: None,
            error: None,
            remote_object_id: None,
            last_attempt_at: None,
        }
    }

    /// Short indicator text, e.g. `"sync failed: contact not found"`.
    pub fn label(&self) -> String {
        match (self.status, self.error.as_deref()) {
            (Some(SyncStatus::Synced), _) => "synced".to_string(),
            (Some(SyncStatus::Pending), _) => "pending".to_string(),
            (Some(SyncStatus::Failed), Some(reason)) => format!("sync failed: {reason}"),
            (Some(SyncStatus::Failed), None) => "sync failed".to_string(),
            (None, Some(reason)) => format!("status unavailable: {reason}"),
            (None, None) => "not synced".to_string(),
        }
    }
}

impl From<SyncMapping> for SyncStatusReport {
    fn from(mapping: SyncMapping) -> Self {
        Self {
            synced: mapping.is_synced(),
            status: Some(mapping.status),
            error: mapping.last_error,
            remote_object_id: mapping.remote_object_id,
            last_attempt_at: Some(mapping.last_attempt_at),
        }
    }
}

/// Whether the subsystem has everything it needs to sync.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigStatus {
    pub configured: bool,
    pub missing: Vec<String>,
}

impl ConfigStatus {
    pub fn from_missing(missing: Vec<String>) -> Self {
        Self { configured: missing.is_empty(), missing }
    }
}
