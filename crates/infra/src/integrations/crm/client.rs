//! Shared CRM API client

use std::time::Duration;

use eventsync_domain::{DirectApiConfig, EventSyncError, Result};
use reqwest::{Method, RequestBuilder, Response};
use url::Url;

use crate::http::HttpClient;

/// Authenticated client for the CRM REST API.
///
/// One instance serves both the contact and the appointment ports.
#[derive(Clone, Debug)]
pub struct CrmClient {
    http: HttpClient,
    base_url: Url,
    location_id: String,
}

impl CrmClient {
    /// Build a client from direct-API settings.
    ///
    /// Fails with `EventSyncError::Config` when the API key, the location id
    /// or a usable base URL is missing.
    pub fn new(config: &DirectApiConfig, timeout: Duration) -> Result<Self> {
        let api_key = required(config.api_key.as_deref(), "api_key")?;
        let location_id = required(config.location_id.as_deref(), "location_id")?;
        let base_url = Url::parse(config.base_url.trim()).map_err(|err| {
            EventSyncError::Config(format!("invalid API base URL '{}': {err}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EventSyncError::Config(format!(
                "API base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .header("authorization", &format!("Bearer {api_key}"), true)?
            .header("version", config.api_version.trim(), false)?
            .header("accept", "application/json", false)?
            .build()?;

        Ok(Self { http, base_url, location_id: location_id.to_string() })
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    /// Absolute URL for the given path segments; segments are percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| EventSyncError::Config("API base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Send the request and turn non-2xx answers into `EventSyncError::RemoteApi`.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = self.http.send(builder).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(EventSyncError::RemoteApi { status: status.as_u16(), body })
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EventSyncError::Config(format!("missing direct API setting: {key}")))
}
