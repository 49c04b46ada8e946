//! Contact resolution through the duplicate-search endpoint

use async_trait::async_trait;
use eventsync_core::ContactResolver;
use eventsync_domain::{EventSyncError, RemoteContact, Result};
use reqwest::Method;
use tracing::debug;

use super::client::CrmClient;
use super::types::DuplicateSearchResponse;

/// Which identity a duplicate search matches on
#[derive(Debug, Clone, Copy)]
enum SearchKey {
    Email,
    Phone,
}

impl SearchKey {
    fn param(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "number",
        }
    }
}

impl CrmClient {
    async fn search_duplicate(&self, key: SearchKey, value: &str) -> Result<Option<RemoteContact>> {
        let url = self.endpoint(&["contacts", "search", "duplicate"])?;
        let request = self
            .request(Method::GET, url)
            .query(&[("locationId", self.location_id()), (key.param(), value)]);

        let response = self.execute(request).await?;
        let body: DuplicateSearchResponse = response.json().await.map_err(|err| {
            EventSyncError::Transport(format!("invalid contact search response: {err}"))
        })?;

        debug!(search = ?key, matched = body.contact.is_some(), "contact duplicate search");
        Ok(body.contact.map(RemoteContact::from))
    }
}

#[async_trait]
impl ContactResolver for CrmClient {
    async fn resolve(&self, email: &str, phone: Option<&str>) -> Result<RemoteContact> {
        let email = email.trim();
        if !email.is_empty() {
            if let Some(contact) = self.search_duplicate(SearchKey::Email, email).await? {
                return Ok(contact);
            }
        }

        if let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) {
            if let Some(contact) = self.search_duplicate(SearchKey::Phone, phone).await? {
                return Ok(contact);
            }
        }

        Err(EventSyncError::ContactNotFound)
    }
}
