//! Per-key async mutual exclusion
//!
//! Serializes sync calls for the same `local_event_id` while calls for
//! different ids proceed concurrently. Entries are dropped from the map as
//! soon as nobody holds or waits for them.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per key
#[derive(Debug, Default)]
pub struct KeyedLocks {
    inner: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until the lock for `key` is free and take it.
    pub async fn lock(&self, key: &str) -> KeyedGuard<'_> {
        let mutex = Arc::clone(self.inner.entry(key.to_string()).or_default().value());
        let guard = mutex.lock_owned().await;
        KeyedGuard { locks: self, key: key.to_string(), guard: Some(guard) }
    }

    /// Number of keys currently locked or awaited
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Held lock for one key; releases (and prunes) on drop
pub struct KeyedGuard<'a> {
    locks: &'a KeyedLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.inner.remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
