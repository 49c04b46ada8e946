//! Explicit construction of the sync subsystem from configuration

use std::sync::Arc;
use std::time::Duration;

use eventsync_core::{DirectApiStrategy, EventSyncCoordinator, SyncMappingStore, SyncStrategy};
use eventsync_domain::{Config, ConfigStatus, DatabaseConfig, Result, StrategyKind, SyncConfig};
use tracing::{info, warn};

use crate::database::{DbManager, SqliteSyncMappingRepository};
use crate::integrations::crm::CrmClient;
use crate::integrations::webhook::WebhookDispatcher;

/// Build a coordinator for the configured strategy.
///
/// Configuration is validated eagerly. When it is incomplete the coordinator
/// is still returned, but it reports the missing keys through
/// `config_status()` and fails every lifecycle call without network traffic.
pub fn build_coordinator(
    config: &SyncConfig,
    store: Arc<dyn SyncMappingStore>,
) -> EventSyncCoordinator {
    let status = config.status();
    if !status.configured {
        warn!(strategy = %config.strategy, missing = ?status.missing, "event sync is not configured");
        return EventSyncCoordinator::unconfigured(status, store);
    }

    match build_strategy(config) {
        Ok(strategy) => {
            info!(strategy = %config.strategy, "event sync coordinator ready");
            EventSyncCoordinator::new(strategy, store)
        }
        Err(err) => {
            warn!(strategy = %config.strategy, error = %err, "failed to build sync strategy");
            EventSyncCoordinator::unconfigured(ConfigStatus::from_missing(vec![err.to_string()]), store)
        }
    }
}

/// Open the SQLite mapping store and apply migrations.
pub fn open_store(config: &DatabaseConfig) -> Result<Arc<SqliteSyncMappingRepository>> {
    let db = Arc::new(DbManager::from_config(config)?);
    db.run_migrations()?;
    db.health_check()?;
    Ok(Arc::new(SqliteSyncMappingRepository::new(db)))
}

/// Open the durable store and build the coordinator in one step.
pub fn build_from_config(config: &Config) -> Result<EventSyncCoordinator> {
    let store = open_store(&config.database)?;
    Ok(build_coordinator(&config.sync, store))
}

fn build_strategy(config: &SyncConfig) -> Result<Arc<dyn SyncStrategy>> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    match config.strategy {
        StrategyKind::DirectApi => {
            let client = Arc::new(CrmClient::new(&config.direct_api, timeout)?);
            Ok(Arc::new(DirectApiStrategy::new(
                client.clone(),
                client,
                config.direct_api.calendars.clone(),
            )))
        }
        StrategyKind::Webhook => {
            let url = config.webhook.url.as_deref().unwrap_or_default();
            Ok(Arc::new(WebhookDispatcher::new(url, timeout)?))
        }
    }
}
