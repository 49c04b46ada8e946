//! In-memory mapping store for tests and hosts without a database.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use eventsync_core::SyncMappingStore;
use eventsync_domain::{MappingUpdate, Result as DomainResult, SyncMapping, SyncStatus};

/// `SyncMappingStore` kept in a concurrent map; contents die with the process.
#[derive(Debug, Default)]
pub struct InMemorySyncMappingStore {
    mappings: DashMap<String, SyncMapping>,
}

impl InMemorySyncMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[async_trait]
impl SyncMappingStore for InMemorySyncMappingStore {
    async fn get(&self, local_event_id: &str) -> DomainResult<Option<SyncMapping>> {
        Ok(self.mappings.get(local_event_id).map(|entry| entry.value().clone()))
    }

    async fn upsert(&self, local_event_id: &str, update: MappingUpdate) -> DomainResult<SyncMapping> {
        let now = Utc::now().timestamp();
        // The entry guard holds the shard lock for the whole merge.
        let mut entry = self
            .mappings
            .entry(local_event_id.to_string())
            .or_insert_with(|| SyncMapping::pending(local_event_id, now));
        entry.apply(update, now);
        Ok(entry.value().clone())
    }

    async fn remove(&self, local_event_id: &str) -> DomainResult<()> {
        self.mappings.remove(local_event_id);
        Ok(())
    }

    async fn list(&self, status: Option<SyncStatus>) -> DomainResult<Vec<SyncMapping>> {
        let mut mappings: Vec<SyncMapping> = self
            .mappings
            .iter()
            .filter(|entry| status.map_or(true, |wanted| entry.status == wanted))
            .map(|entry| entry.value().clone())
            .collect();
        mappings.sort_by(|a, b| a.local_event_id.cmp(&b.local_event_id));
        Ok(mappings)
    }
}
