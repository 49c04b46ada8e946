//! Webhook dispatcher
//!
//! Posts one JSON envelope per lifecycle transition to a fixed automation
//! endpoint:
//!
//! ```json
//! { "lifecycleKind": "created", "eventData": { "local_id": "evt-1", ... }, "referenceMapping": null }
//! ```
//!
//! The remote automation may answer with the id of the object it created,
//! under `id` or `appointmentId`. Every code path yields a [`SyncResult`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventsync_core::SyncStrategy;
use eventsync_domain::{
    CalendarEvent, EventSyncError, LifecycleKind, Result, StrategyKind, SyncMapping, SyncResult,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

const ID_KEYS: [&str; 2] = ["id", "appointmentId"];
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Flattened event fields sent as `eventData`, in snake_case.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WebhookEventData<'a> {
    Full {
        local_id: &'a str,
        client_id: &'a str,
        client_email: &'a str,
        client_phone: Option<&'a str>,
        client_name: &'a str,
        title: &'a str,
        category: &'a str,
        start_date: &'a str,
        end_date: &'a str,
        start_time: &'a str,
        end_time: &'a str,
        description: Option<&'a str>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
    /// Deletions only know the local id.
    Deleted { local_id: &'a str },
}

impl<'a> From<&'a CalendarEvent> for WebhookEventData<'a> {
    fn from(event: &'a CalendarEvent) -> Self {
        Self::Full {
            local_id: &event.local_id,
            client_id: &event.client_id,
            client_email: &event.client_email,
            client_phone: event.client_phone.as_deref(),
            client_name: &event.client_name,
            title: &event.title,
            category: &event.category,
            start_date: &event.start_date,
            end_date: &event.end_date,
            start_time: &event.start_time,
            end_time: &event.end_time,
            description: event.description.as_deref(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookEnvelope<'a> {
    lifecycle_kind: LifecycleKind,
    event_data: WebhookEventData<'a>,
    reference_mapping: Option<&'a SyncMapping>,
}

/// Sync strategy that notifies a webhook-driven automation
#[derive(Clone, Debug)]
pub struct WebhookDispatcher {
    http: HttpClient,
    url: Url,
}

impl WebhookDispatcher {
    /// Fails with `EventSyncError::Config` unless `url` is an absolute http(s) URL.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url.trim())
            .map_err(|err| EventSyncError::Config(format!("invalid webhook URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EventSyncError::Config(format!(
                "webhook URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    /// Post the envelope and report the outcome. Never fails.
    pub async fn dispatch(
        &self,
        kind: LifecycleKind,
        event_data: WebhookEventData<'_>,
        current: Option<&SyncMapping>,
    ) -> SyncResult {
        let envelope =
            WebhookEnvelope { lifecycle_kind: kind, event_data, reference_mapping: current };
        let request = self.http.request(Method::POST, self.url.clone()).json(&envelope);

        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%kind, error = %err, "webhook delivery failed");
                return SyncResult::failed(err.to_string());
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!(%kind, status = status.as_u16(), "webhook rejected");
            return SyncResult::failed(format!("webhook returned HTTP {}: {}", status.as_u16(), body));
        }

        let remote_id = extract_remote_id(&body);
        debug!(%kind, remote_id = ?remote_id, "webhook dispatched");
        SyncResult::dispatched(remote_id)
    }
}

/// Remote reference id from a webhook answer, if the body carries one.
fn extract_remote_id(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    ID_KEYS.iter().find_map(|key| match object.get(*key)? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

#[async_trait]
impl SyncStrategy for WebhookDispatcher {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Webhook
    }

    async fn create(&self, event: &CalendarEvent, current: Option<&SyncMapping>) -> SyncResult {
        self.dispatch(LifecycleKind::Created, event.into(), current).await
    }

    async fn update(&self, event: &CalendarEvent, current: Option<&SyncMapping>) -> SyncResult {
        self.dispatch(LifecycleKind::Updated, event.into(), current).await
    }

    async fn delete(&self, local_event_id: &str, current: &SyncMapping) -> SyncResult {
        let event_data = WebhookEventData::Deleted { local_id: local_event_id };
        self.dispatch(LifecycleKind::Deleted, event_data, Some(current)).await
    }
}
