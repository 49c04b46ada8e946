use std::time::Duration;

use eventsync_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use eventsync_domain::{EventSyncError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("eventsync/", env!("CARGO_PKG_VERSION"));

/// HTTP client with a bounded request timeout.
///
/// Performs exactly one attempt per request; retry policy belongs to the
/// caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request; transport failures become `EventSyncError::Transport`.
    ///
    /// Any HTTP status is returned as a response, including non-2xx ones.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(|err| EventSyncError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = redact_query(request.url());
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Query strings carry contact emails and phone numbers; keep them out of logs.
fn redact_query(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    if url.query().is_some() {
        url.set_query(Some("redacted"));
    }
    url.to_string()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: HeaderMap,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
            default_headers: HeaderMap::new(),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Add a header sent with every request.
    ///
    /// Names are case-insensitive. Values flagged `sensitive` are masked in
    /// reqwest's debug output.
    pub fn header(mut self, name: &str, value: &str, sensitive: bool) -> Result<Self> {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| EventSyncError::Config(format!("invalid HTTP header name '{name}'")))?;
        let mut value = HeaderValue::from_str(value).map_err(|_| {
            EventSyncError::Config(format!("invalid value for HTTP header '{name}'"))
        })?;
        value.set_sensitive(sensitive);
        self.default_headers.insert(header, value);
        Ok(self)
    }

    pub fn build(self) -> Result<HttpClient> {
        let agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_string());
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(agent)
            .default_headers(self.default_headers)
            .no_proxy()
            .build()
            .map_err(|err| EventSyncError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
