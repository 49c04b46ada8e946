//! Configuration loader
//!
//! Loads sync configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file if present, then the process environment
//! 2. If `EVENTSYNC_DB_PATH` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `EVENTSYNC_DB_PATH`: Mapping store database file (required)
//! - `EVENTSYNC_DB_POOL_SIZE`: Connection pool size
//! - `EVENTSYNC_STRATEGY`: `direct_api` or `webhook`
//! - `EVENTSYNC_API_BASE_URL`: CRM REST API base URL
//! - `EVENTSYNC_API_VERSION`: Value of the `Version` header
//! - `EVENTSYNC_API_KEY`: Bearer token for the CRM API
//! - `EVENTSYNC_LOCATION_ID`: CRM location (tenant) id
//! - `EVENTSYNC_CALENDARS`: `category=calendar_id` pairs, comma separated
//! - `EVENTSYNC_WEBHOOK_URL`: Automation endpoint for the webhook strategy
//! - `EVENTSYNC_REQUEST_TIMEOUT_SECS`: Per-request HTTP timeout
//!
//! ## File Locations
//! The loader checks the following paths (in order):
//! 1. `./config.{json,toml}` and `./eventsync.{json,toml}`
//! 2. `../config.{json,toml}` and `../../config.{json,toml}`
//! 3. The same names relative to the executable location

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use eventsync_domain::constants::DEFAULT_DB_POOL_SIZE;
use eventsync_domain::{
    Config, DatabaseConfig, DirectApiConfig, EventSyncError, Result, StrategyKind, SyncConfig,
    WebhookConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `EventSyncError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    // A missing .env file is the normal case outside development.
    let _ = dotenvy::dotenv();

    match load_from_env() {
        Ok(config) => {
            tracing::info!(
                strategy = %config.sync.strategy,
                "Configuration loaded from environment variables"
            );
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `EVENTSYNC_DB_PATH` is required; every other variable falls back to
/// the defaults of the domain configuration types.
///
/// # Errors
/// Returns `EventSyncError::Config` if the database path is missing or a
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let defaults = SyncConfig::default();

    let db_path = env_var("EVENTSYNC_DB_PATH")?;
    let pool_size = env_parse("EVENTSYNC_DB_POOL_SIZE", "pool size")?
        .unwrap_or(DEFAULT_DB_POOL_SIZE);

    let strategy = env_parse::<StrategyKind>("EVENTSYNC_STRATEGY", "strategy")?
        .unwrap_or(defaults.strategy);
    let request_timeout_secs =
        env_parse("EVENTSYNC_REQUEST_TIMEOUT_SECS", "request timeout")?
            .unwrap_or(defaults.request_timeout_secs);

    let calendars = match env_opt("EVENTSYNC_CALENDARS") {
        Some(raw) => parse_calendars(&raw)?,
        None => BTreeMap::new(),
    };

    let direct_api = DirectApiConfig {
        base_url: env_opt("EVENTSYNC_API_BASE_URL").unwrap_or(defaults.direct_api.base_url),
        api_version: env_opt("EVENTSYNC_API_VERSION").unwrap_or(defaults.direct_api.api_version),
        api_key: env_opt("EVENTSYNC_API_KEY"),
        location_id: env_opt("EVENTSYNC_LOCATION_ID"),
        calendars,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size },
        sync: SyncConfig {
            strategy,
            request_timeout_secs,
            direct_api,
            webhook: WebhookConfig { url: env_opt("EVENTSYNC_WEBHOOK_URL") },
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches several locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `EventSyncError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EventSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            EventSyncError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EventSyncError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse `category=calendar_id` pairs separated by commas.
///
/// Blank entries are skipped; duplicate categories keep the last id.
///
/// # Errors
/// Returns `EventSyncError::Config` for entries without `=` or with an empty
/// side.
pub fn parse_calendars(raw: &str) -> Result<BTreeMap<String, String>> {
    let mut calendars = BTreeMap::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (category, calendar_id) = entry
            .split_once('=')
            .map(|(category, id)| (category.trim(), id.trim()))
            .filter(|(category, id)| !category.is_empty() && !id.is_empty())
            .ok_or_else(|| {
                EventSyncError::Config(format!("Invalid calendar mapping entry: '{entry}'"))
            })?;
        calendars.insert(category.to_string(), calendar_id.to_string());
    }
    Ok(calendars)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EventSyncError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EventSyncError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(EventSyncError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    const NAMES: [&str; 8] = [
        "config.json",
        "config.toml",
        "eventsync.json",
        "eventsync.toml",
        "../config.json",
        "../config.toml",
        "../../config.json",
        "../../config.toml",
    ];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        EventSyncError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| EventSyncError::Config(format!("Invalid {what} in {key}: {e}")))
        })
        .transpose()
}
