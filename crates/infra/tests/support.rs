#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use eventsync_domain::{CalendarEvent, StrategyKind, SyncConfig};
use eventsync_infra::database::{DbManager, SqliteSyncMappingRepository};
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with migrations applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("sync.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("migrations should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    /// Mapping repository over this database.
    pub fn store(&self) -> Arc<SqliteSyncMappingRepository> {
        Arc::new(SqliteSyncMappingRepository::new(Arc::clone(&self.manager)))
    }

    /// Count raw rows in the mapping table.
    pub fn mapping_rows(&self) -> i64 {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row("SELECT COUNT(*) FROM sync_mappings", [], |row| row.get(0))
            .expect("count query should succeed")
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Direct-API configuration pointing at a mock server.
pub fn direct_api_config(base_url: &str) -> SyncConfig {
    let mut config = SyncConfig::default();
    config.request_timeout_secs = 5;
    config.direct_api.base_url = base_url.to_string();
    config.direct_api.api_key = Some("test-token".to_string());
    config.direct_api.location_id = Some("loc-1".to_string());
    config.direct_api.calendars = BTreeMap::from([
        ("onboarding".to_string(), "cal-onboarding".to_string()),
        ("handover".to_string(), "cal-handover".to_string()),
    ]);
    config
}

/// Webhook configuration pointing at a mock server.
pub fn webhook_config(url: &str) -> SyncConfig {
    let mut config = SyncConfig { strategy: StrategyKind::Webhook, ..SyncConfig::default() };
    config.request_timeout_secs = 5;
    config.webhook.url = Some(url.to_string());
    config
}

/// Onboarding event on 2025-09-01 from 09:00 to 10:00 for `a@b.com`.
pub fn onboarding_event(local_id: &str) -> CalendarEvent {
    let created = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();
    CalendarEvent {
        local_id: local_id.to_string(),
        client_id: "client-1".to_string(),
        client_email: "a@b.com".to_string(),
        client_phone: None,
        client_name: "Ada Lovelace".to_string(),
        title: "Onboarding call".to_string(),
        category: "onboarding".to_string(),
        start_date: "2025-09-01".to_string(),
        end_date: "2025-09-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        description: None,
        created_at: created,
        updated_at: created,
    }
}
