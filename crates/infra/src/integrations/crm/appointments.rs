//! Appointment create, update and delete calls

use async_trait::async_trait;
use eventsync_core::AppointmentClient;
use eventsync_domain::{Appointment, EventSyncError, Result};
use reqwest::Method;
use tracing::debug;

use super::client::CrmClient;
use super::types::{AppointmentRequest, AppointmentResponse};

#[async_trait]
impl AppointmentClient for CrmClient {
    async fn create(&self, appointment: &Appointment) -> Result<String> {
        let url = self.endpoint(&["calendars", "events", "appointments"])?;
        let body = AppointmentRequest { location_id: self.location_id(), appointment };

        let response = self.execute(self.request(Method::POST, url).json(&body)).await?;
        let status = response.status().as_u16();
        let created: AppointmentResponse = response.json().await.map_err(|err| {
            EventSyncError::Transport(format!("invalid appointment response: {err}"))
        })?;

        let remote_id = created.into_id().ok_or_else(|| EventSyncError::RemoteApi {
            status,
            body: "appointment response did not include an id".into(),
        })?;
        debug!(remote_id = %remote_id, calendar_id = %appointment.calendar_id, "appointment created");
        Ok(remote_id)
    }

    async fn update(&self, remote_id: &str, appointment: &Appointment) -> Result<()> {
        let url = self.endpoint(&["calendars", "events", "appointments", remote_id])?;
        let body = AppointmentRequest { location_id: self.location_id(), appointment };

        self.execute(self.request(Method::PUT, url).json(&body)).await?;
        debug!(remote_id, "appointment updated");
        Ok(())
    }

    async fn delete(&self, remote_id: &str) -> Result<()> {
        let url = self.endpoint(&["calendars", "events", remote_id])?;

        self.execute(self.request(Method::DELETE, url)).await?;
        debug!(remote_id, "appointment deleted");
        Ok(())
    }
}
