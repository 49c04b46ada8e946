//! Sync mapping repository implementation
//!
//! Durable local-event → remote-object mappings in the `sync_mappings` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use eventsync_core::SyncMappingStore;
use eventsync_domain::{
    EventSyncError, MappingUpdate, Result as DomainResult, SyncMapping, SyncStatus,
};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use tokio::task;

use super::manager::{map_sql_error, DbManager};

/// SQLite-backed `SyncMappingStore`
pub struct SqliteSyncMappingRepository {
    db: Arc<DbManager>,
}

impl SqliteSyncMappingRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SyncMappingStore for SqliteSyncMappingRepository {
    async fn get(&self, local_event_id: &str) -> DomainResult<Option<SyncMapping>> {
        let db = Arc::clone(&self.db);
        let local_event_id = local_event_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<SyncMapping>> {
            let conn = db.get_connection()?;
            query_mapping(&conn, &local_event_id).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert(&self, local_event_id: &str, update: MappingUpdate) -> DomainResult<SyncMapping> {
        let db = Arc::clone(&self.db);
        let local_event_id = local_event_id.to_string();

        task::spawn_blocking(move || -> DomainResult<SyncMapping> {
            let mut conn = db.get_connection()?;
            upsert_mapping(&mut conn, &local_event_id, update, Utc::now().timestamp())
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn remove(&self, local_event_id: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let local_event_id = local_event_id.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "DELETE FROM sync_mappings WHERE local_event_id = ?1",
                params![local_event_id],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self, status: Option<SyncStatus>) -> DomainResult<Vec<SyncMapping>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<SyncMapping>> {
            let conn = db.get_connection()?;
            query_mappings(&conn, status).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

// ============================================================================
// SQL Operations (synchronous)
// ============================================================================

const SELECT_COLUMNS: &str = "SELECT local_event_id, remote_object_id, status, last_attempt_at, \
     last_error, last_remote_object_id FROM sync_mappings";

fn query_mapping(conn: &Connection, local_event_id: &str) -> rusqlite::Result<Option<SyncMapping>> {
    let sql = format!("{SELECT_COLUMNS} WHERE local_event_id = ?1");
    conn.query_row(&sql, params![local_event_id], map_mapping_row).optional()
}

fn query_mappings(
    conn: &Connection,
    status: Option<SyncStatus>,
) -> rusqlite::Result<Vec<SyncMapping>> {
    match status {
        Some(status) => {
            let sql = format!("{SELECT_COLUMNS} WHERE status = ?1 ORDER BY local_event_id ASC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![status.as_str()], map_mapping_row)?;
            rows.collect()
        }
        None => {
            let sql = format!("{SELECT_COLUMNS} ORDER BY local_event_id ASC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], map_mapping_row)?;
            rows.collect()
        }
    }
}

/// Read-merge-write inside one immediate transaction, so concurrent writers
/// for the same id never interleave.
fn upsert_mapping(
    conn: &mut Connection,
    local_event_id: &str,
    update: MappingUpdate,
    now: i64,
) -> rusqlite::Result<SyncMapping> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut mapping =
        query_mapping(&tx, local_event_id)?.unwrap_or_else(|| SyncMapping::pending(local_event_id, now));
    mapping.apply(update, now);

    tx.execute(
        "INSERT INTO sync_mappings
             (local_event_id, remote_object_id, status, last_attempt_at, last_error, last_remote_object_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(local_event_id) DO UPDATE SET
             remote_object_id = excluded.remote_object_id,
             status = excluded.status,
             last_attempt_at = excluded.last_attempt_at,
             last_error = excluded.last_error,
             last_remote_object_id = excluded.last_remote_object_id",
        params![
            &mapping.local_event_id,
            &mapping.remote_object_id,
            mapping.status.as_str(),
            mapping.last_attempt_at,
            &mapping.last_error,
            &mapping.last_remote_object_id,
        ],
    )?;
    tx.commit()?;

    Ok(mapping)
}

fn map_mapping_row(row: &Row<'_>) -> rusqlite::Result<SyncMapping> {
    let status: String = row.get(2)?;
    let status = status
        .parse::<SyncStatus>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, err.into()))?;

    Ok(SyncMapping {
        local_event_id: row.get(0)?,
        remote_object_id: row.get(1)?,
        status,
        last_attempt_at: row.get(3)?,
        last_error: row.get(4)?,
        last_remote_object_id: row.get(5)?,
    })
}

// ============================================================================
// Error Mapping
// ============================================================================

fn map_join_error(err: task::JoinError) -> EventSyncError {
    if err.is_cancelled() {
        EventSyncError::Internal("blocking task cancelled".into())
    } else {
        EventSyncError::Internal(format!("blocking task failed: {err}"))
    }
}

// ============================================================================
// Tests
// ============================================================================
