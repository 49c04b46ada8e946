//! Configuration structures
//!
//! Loaded by the infra config loader from the environment or a TOML/JSON
//! file. Validation is eager: [`SyncConfig::status`] reports every missing
//! key for the selected strategy before any sync is attempted.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, DEFAULT_DB_POOL_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::types::ConfigStatus;

/// Top-level configuration for the sync subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Mapping store database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Which propagation mechanism is used for every event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    DirectApi,
    Webhook,
}

storage_strings!(StrategyKind, "sync strategy" {
    DirectApi => "direct_api",
    Webhook => "webhook",
});

/// Sync strategy selection and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub direct_api: DirectApiConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            direct_api: DirectApiConfig::default(),
            webhook: WebhookConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Report the configuration keys still missing for the selected strategy.
    pub fn status(&self) -> ConfigStatus {
        let mut missing = Vec::new();

        match self.strategy {
            StrategyKind::DirectApi => {
                let api = &self.direct_api;
                if !is_http_url(&api.base_url) {
                    missing.push("base_url".to_string());
                }
                if is_blank(api.api_key.as_deref()) {
                    missing.push("api_key".to_string());
                }
                if is_blank(api.location_id.as_deref()) {
                    missing.push("location_id".to_string());
                }
                if api.calendars.is_empty()
                    || api.calendars.values().any(|calendar_id| calendar_id.trim().is_empty())
                {
                    missing.push("calendars".to_string());
                }
            }
            StrategyKind::Webhook => {
                if !self.webhook.url.as_deref().is_some_and(is_http_url) {
                    missing.push("webhook_url".to_string());
                }
            }
        }

        if self.request_timeout_secs == 0 {
            missing.push("request_timeout_secs".to_string());
        }

        ConfigStatus::from_missing(missing)
    }
}

/// Direct REST API strategy settings
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    /// Event category → remote calendar id
    #[serde(default)]
    pub calendars: BTreeMap<String, String>,
}

impl Default for DirectApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            api_version: default_api_version(),
            api_key: None,
            location_id: None,
            calendars: BTreeMap::new(),
        }
    }
}

impl fmt::Debug for DirectApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectApiConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("location_id", &self.location_id)
            .field("calendars", &self.calendars)
            .finish()
    }
}

/// Webhook strategy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: Option<String>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    ["https://", "http://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.starts_with(scheme))
}

fn default_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}
