//! Mock mapping stores for testing

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eventsync_core::SyncMappingStore;
use eventsync_domain::{
    EventSyncError, MappingUpdate, Result as DomainResult, SyncMapping, SyncStatus,
};

/// In-memory `SyncMappingStore` with a manual clock.
#[derive(Default, Clone)]
pub struct MockMappingStore {
    mappings: Arc<Mutex<HashMap<String, SyncMapping>>>,
    clock: Arc<Mutex<i64>>,
}

impl MockMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a mapping directly, bypassing the coordinator.
    pub fn with_mapping(self, mapping: SyncMapping) -> Self {
        self.mappings.lock().unwrap().insert(mapping.local_event_id.clone(), mapping);
        self
    }

    pub fn snapshot(&self, local_event_id: &str) -> Option<SyncMapping> {
        self.mappings.lock().unwrap().get(local_event_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.mappings.lock().unwrap().len()
    }

    fn tick(&self) -> i64 {
        let mut clock = self.clock.lock().unwrap();
        *clock += 1;
        *clock
    }
}

#[async_trait]
impl SyncMappingStore for MockMappingStore {
    async fn get(&self, local_event_id: &str) -> DomainResult<Option<SyncMapping>> {
        Ok(self.snapshot(local_event_id))
    }

    async fn upsert(&self, local_event_id: &str, update: MappingUpdate) -> DomainResult<SyncMapping> {
        let now = self.tick();
        let mut mappings = self.mappings.lock().unwrap();
        let mapping = mappings
            .entry(local_event_id.to_string())
            .or_insert_with(|| SyncMapping::pending(local_event_id, now));
        mapping.apply(update, now);
        Ok(mapping.clone())
    }

    async fn remove(&self, local_event_id: &str) -> DomainResult<()> {
        self.mappings.lock().unwrap().remove(local_event_id);
        Ok(())
    }

    async fn list(&self, status: Option<SyncStatus>) -> DomainResult<Vec<SyncMapping>> {
        let mut all: Vec<SyncMapping> = self
            .mappings
            .lock()
            .unwrap()
            .values()
            .filter(|mapping| status.map_or(true, |wanted| mapping.status == wanted))
            .cloned()
            .collect();
        all.sort_by(|a, b| a.local_event_id.cmp(&b.local_event_id));
        Ok(all)
    }
}

/// Store whose every call fails, for exercising store-failure paths.
#[derive(Default, Clone)]
pub struct BrokenMappingStore;

#[async_trait]
impl SyncMappingStore for BrokenMappingStore {
    async fn get(&self, _local_event_id: &str) -> DomainResult<Option<SyncMapping>> {
        Err(EventSyncError::Database("disk I/O error".into()))
    }

    async fn upsert(&self, _local_event_id: &str, _update: MappingUpdate) -> DomainResult<SyncMapping> {
        Err(EventSyncError::Database("disk I/O error".into()))
    }

    async fn remove(&self, _local_event_id: &str) -> DomainResult<()> {
        Err(EventSyncError::Database("disk I/O error".into()))
    }

    async fn list(&self, _status: Option<SyncStatus>) -> DomainResult<Vec<SyncMapping>> {
        Err(EventSyncError::Database("disk I/O error".into()))
    }
}
