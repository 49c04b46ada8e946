//! Event sync coordinator
//!
//! Public entry point for the host application. Every lifecycle call follows
//! the same shape: mark the mapping `Pending`, run the configured strategy,
//! then record `Synced` or `Failed`. Nothing here returns an error to the
//! caller; outcomes are written to the mapping store and reported as
//! [`SyncResult`].

use std::sync::Arc;

use eventsync_domain::constants::NO_MAPPING_ERROR;
use eventsync_domain::{
    CalendarEvent, ConfigStatus, EventSyncError, LifecycleKind, MappingUpdate, Result,
    StrategyKind, SyncMapping, SyncResult, SyncStatus, SyncStatusReport,
};
use tracing::{debug, info, instrument, warn};

use super::keyed_lock::KeyedLocks;
use super::ports::{SyncMappingStore, SyncStrategy};

pub struct EventSyncCoordinator {
    store: Arc<dyn SyncMappingStore>,
    strategy: Option<Arc<dyn SyncStrategy>>,
    config_status: ConfigStatus,
    locks: KeyedLocks,
}

impl EventSyncCoordinator {
    /// Coordinator backed by a fully configured strategy.
    pub fn new(strategy: Arc<dyn SyncStrategy>, store: Arc<dyn SyncMappingStore>) -> Self {
        Self {
            store,
            strategy: Some(strategy),
            config_status: ConfigStatus::from_missing(Vec::new()),
            locks: KeyedLocks::new(),
        }
    }

    /// Coordinator without a usable strategy.
    ///
    /// Lifecycle calls still track mappings but fail fast with a
    /// configuration error and never touch the network.
    pub fn unconfigured(config_status: ConfigStatus, store: Arc<dyn SyncMappingStore>) -> Self {
        Self { store, strategy: None, config_status, locks: KeyedLocks::new() }
    }

    pub fn config_status(&self) -> ConfigStatus {
        self.config_status.clone()
    }

    /// Kind of the active strategy, `None` when unconfigured
    pub fn strategy_kind(&self) -> Option<StrategyKind> {
        self.strategy.as_ref().map(|strategy| strategy.kind())
    }

    #[instrument(skip(self, event), fields(local_event_id = %event.local_id))]
    pub async fn on_created(&self, event: &CalendarEvent) -> SyncResult {
        self.sync_event(LifecycleKind::Created, event).await
    }

    #[instrument(skip(self, event), fields(local_event_id = %event.local_id))]
    pub async fn on_updated(&self, event: &CalendarEvent) -> SyncResult {
        self.sync_event(LifecycleKind::Updated, event).await
    }

    #[instrument(skip(self))]
    pub async fn on_deleted(&self, local_event_id: &str) -> SyncResult {
        let _guard = self.locks.lock(local_event_id).await;

        let current = match self.store.get(local_event_id).await {
            Ok(Some(mapping)) => mapping,
            Ok(None) => {
                debug!("delete requested for unmapped event");
                return SyncResult::failed(NO_MAPPING_ERROR);
            }
            Err(err) => return store_failure(err),
        };

        if let Err(err) = self.store.upsert(local_event_id, MappingUpdate::Pending).await {
            return store_failure(err);
        }

        let result = match &self.strategy {
            Some(strategy) => strategy.delete(local_event_id, &current).await,
            None => self.not_configured(),
        };

        if result.success {
            if let Err(err) = self.store.remove(local_event_id).await {
                return store_failure(err);
            }
            info!("remote deletion succeeded, mapping removed");
            return result;
        }

        let error = result.error.clone().unwrap_or_default();
        warn!(error = %error, "remote deletion failed");
        if let Err(err) = self.store.upsert(local_event_id, MappingUpdate::failed(error)).await {
            return store_failure(err);
        }
        result
    }

    /// Current sync indicator data for an event
    #[instrument(skip(self))]
    pub async fn sync_status(&self, local_event_id: &str) -> SyncStatusReport {
        match self.store.get(local_event_id).await {
            Ok(Some(mapping)) => SyncStatusReport::from(mapping),
            Ok(None) => SyncStatusReport::untracked(),
            Err(err) => {
                warn!(error = %err, "failed to read sync mapping");
                SyncStatusReport { error: Some(err.to_string()), ..SyncStatusReport::untracked() }
            }
        }
    }

    /// Drop the mapping for an event without contacting the remote platform
    #[instrument(skip(self))]
    pub async fn purge(&self, local_event_id: &str) -> SyncResult {
        let _guard = self.locks.lock(local_event_id).await;

        match self.store.remove(local_event_id).await {
            Ok(()) => {
                info!("mapping purged");
                SyncResult::dispatched(None)
            }
            Err(err) => store_failure(err),
        }
    }

    /// Stored mappings, optionally filtered by status
    pub async fn mappings(&self, status: Option<SyncStatus>) -> Result<Vec<SyncMapping>> {
        self.store.list(status).await
    }

    async fn sync_event(&self, kind: LifecycleKind, event: &CalendarEvent) -> SyncResult {
        let local_event_id = event.local_id.as_str();
        let _guard = self.locks.lock(local_event_id).await;

        let previous = match self.store.get(local_event_id).await {
            Ok(previous) => previous,
            Err(err) => return store_failure(err),
        };

        if let Err(err) = self.store.upsert(local_event_id, MappingUpdate::Pending).await {
            return store_failure(err);
        }

        let result = match &self.strategy {
            Some(strategy) => match kind {
                LifecycleKind::Updated => strategy.update(event, previous.as_ref()).await,
                _ => strategy.create(event, previous.as_ref()).await,
            },
            None => self.not_configured(),
        };

        let update = mapping_update(&result, local_event_id, previous.as_ref());
        if let Err(err) = self.store.upsert(local_event_id, update).await {
            return store_failure(err);
        }

        if result.success {
            info!(%kind, remote_id = ?result.remote_object_id, "event synced");
        } else {
            warn!(%kind, error = ?result.error, "event sync failed");
        }
        result
    }

    fn not_configured(&self) -> SyncResult {
        let missing = self.config_status.missing.join(", ");
        SyncResult::failed(
            EventSyncError::Config(format!("sync is not configured (missing: {missing})"))
                .to_string(),
        )
    }
}

/// Terminal mapping update for a strategy outcome.
///
/// A `Synced` mapping always carries a reference. Strategies that cannot learn
/// a remote id (a webhook answering with an empty body) keep the last known
/// reference, or fall back to the local id. The caller still gets the
/// strategy's result unchanged.
fn mapping_update(
    result: &SyncResult,
    local_event_id: &str,
    previous: Option<&SyncMapping>,
) -> MappingUpdate {
    if result.success && result.remote_object_id.is_none() {
        let reference = previous.and_then(SyncMapping::known_remote_id).unwrap_or(local_event_id);
        return MappingUpdate::synced(reference);
    }
    MappingUpdate::from_result(result)
}

fn store_failure(err: EventSyncError) -> SyncResult {
    warn!(error = %err, "sync mapping store failure");
    SyncResult::failed(err.to_string())
}
