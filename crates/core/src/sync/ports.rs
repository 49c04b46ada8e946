//! Port interfaces for sync operations

use async_trait::async_trait;
use eventsync_domain::{
    Appointment, CalendarEvent, MappingUpdate, RemoteContact, Result, StrategyKind,
    SyncMapping, SyncResult, SyncStatus,
};

/// Authoritative store of local-event → remote-object mappings
#[async_trait]
pub trait SyncMappingStore: Send + Sync {
    /// Get the mapping for a local event
    async fn get(&self, local_event_id: &str) -> Result<Option<SyncMapping>>;

    /// Create (as `Pending`) or merge the mapping and stamp the attempt time.
    ///
    /// Atomic per `local_event_id`; repeated calls never duplicate a mapping.
    async fn upsert(&self, local_event_id: &str, update: MappingUpdate) -> Result<SyncMapping>;

    /// Remove the mapping; removing an absent mapping is not an error
    async fn remove(&self, local_event_id: &str) -> Result<()>;

    /// List mappings, optionally restricted to one status
    async fn list(&self, status: Option<SyncStatus>) -> Result<Vec<SyncMapping>>;
}

/// Mechanism that propagates an event to the remote platform.
///
/// Implementations never fail past this boundary: every outcome is reported
/// as a [`SyncResult`]. `current` is the mapping as it was before the attempt
/// started; [`SyncMapping::known_remote_id`] gives the remote object confirmed
/// by an earlier sync even when the latest attempt failed.
#[async_trait]
pub trait SyncStrategy: Send + Sync {
    /// Strategy identifier used in logs
    fn kind(&self) -> StrategyKind;

    /// Propagate a newly created event
    async fn create(&self, event: &CalendarEvent, current: Option<&SyncMapping>) -> SyncResult;

    /// Propagate changes to an existing event
    async fn update(&self, event: &CalendarEvent, current: Option<&SyncMapping>) -> SyncResult;

    /// Propagate the deletion of a mapped event
    async fn delete(&self, local_event_id: &str, current: &SyncMapping) -> SyncResult;
}

/// Looks up the remote contact for a local client
#[async_trait]
pub trait ContactResolver: Send + Sync {
    /// Search by email first, then by phone when one is supplied.
    ///
    /// Returns `EventSyncError::ContactNotFound` when neither search matches.
    async fn resolve(&self, email: &str, phone: Option<&str>) -> Result<RemoteContact>;
}

/// Appointment endpoints of the remote platform's REST API.
///
/// Non-2xx responses surface as `EventSyncError::RemoteApi`; implementations
/// never retry on their own.
#[async_trait]
pub trait AppointmentClient: Send + Sync {
    /// Create an appointment and return its remote id
    async fn create(&self, appointment: &Appointment) -> Result<String>;

    /// Update an existing appointment
    async fn update(&self, remote_id: &str, appointment: &Appointment) -> Result<()>;

    /// Delete an appointment
    async fn delete(&self, remote_id: &str) -> Result<()>;
}
