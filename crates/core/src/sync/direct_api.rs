//! Direct-API sync strategy
//!
//! Resolves the client to a remote contact and drives the remote platform's
//! appointment endpoints. The calendar is picked from the event category.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use eventsync_domain::{
    Appointment, CalendarEvent, EventSyncError, Result, StrategyKind, SyncMapping, SyncResult,
};
use tracing::debug;

use super::ports::{AppointmentClient, ContactResolver, SyncStrategy};

/// Sync strategy talking to the remote REST API directly
pub struct DirectApiStrategy {
    contacts: Arc<dyn ContactResolver>,
    appointments: Arc<dyn AppointmentClient>,
    calendars: BTreeMap<String, String>,
}

impl DirectApiStrategy {
    pub fn new(
        contacts: Arc<dyn ContactResolver>,
        appointments: Arc<dyn AppointmentClient>,
        calendars: BTreeMap<String, String>,
    ) -> Self {
        Self { contacts, appointments, calendars }
    }

    /// Calendar id for a category; exact match wins over a case-insensitive one.
    pub fn calendar_for(&self, category: &str) -> Result<&str> {
        if let Some(id) = self.calendars.get(category) {
            return Ok(id);
        }
        self.calendars
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(category))
            .map(|(_, id)| id.as_str())
            .ok_or_else(|| {
                EventSyncError::Config(format!("no calendar configured for category '{category}'"))
            })
    }

    fn appointment(&self, event: &CalendarEvent, contact_id: Option<String>) -> Result<Appointment> {
        let calendar_id = self.calendar_for(&event.category)?.to_string();
        let (start_time, end_time) = event.time_range()?;
        Ok(Appointment {
            calendar_id,
            contact_id,
            start_time,
            end_time,
            title: event.title.clone(),
            notes: event.notes(),
        })
    }

    async fn create_remote(&self, event: &CalendarEvent) -> Result<String> {
        // Validate locally before any network call.
        self.appointment(event, None)?;

        let contact = self.contacts.resolve(&event.client_email, event.phone()).await?;
        debug!(
            local_event_id = %event.local_id,
            remote_contact_id = %contact.remote_contact_id,
            "resolved remote contact"
        );

        let appointment = self.appointment(event, Some(contact.remote_contact_id))?;
        self.appointments.create(&appointment).await
    }

    async fn update_remote(&self, event: &CalendarEvent, remote_id: &str) -> Result<()> {
        let appointment = self.appointment(event, None)?;
        self.appointments.update(remote_id, &appointment).await
    }
}

/// Remote appointment of the event, including one confirmed before a failed
/// attempt, so retries never mirror the same event twice.
fn existing_remote_id(current: Option<&SyncMapping>) -> Option<&str> {
    current.and_then(SyncMapping::known_remote_id)
}

#[async_trait]
impl SyncStrategy for DirectApiStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DirectApi
    }

    async fn create(&self, event: &CalendarEvent, current: Option<&SyncMapping>) -> SyncResult {
        // A repeated create for an already mirrored event updates in place.
        if let Some(remote_id) = existing_remote_id(current) {
            debug!(local_event_id = %event.local_id, remote_id, "event already synced, updating");
            return self.update(event, current).await;
        }

        match self.create_remote(event).await {
            Ok(remote_id) => SyncResult::synced(remote_id),
            Err(err) => SyncResult::failed(err.to_string()),
        }
    }

    async fn update(&self, event: &CalendarEvent, current: Option<&SyncMapping>) -> SyncResult {
        let Some(remote_id) = existing_remote_id(current) else {
            debug!(local_event_id = %event.local_id, "no remote appointment yet, creating");
            return match self.create_remote(event).await {
                Ok(remote_id) => SyncResult::synced(remote_id),
                Err(err) => SyncResult::failed(err.to_string()),
            };
        };

        match self.update_remote(event, remote_id).await {
            Ok(()) => SyncResult::synced(remote_id),
            Err(err) => SyncResult::failed(err.to_string()),
        }
    }

    async fn delete(&self, local_event_id: &str, current: &SyncMapping) -> SyncResult {
        let Some(remote_id) = current.known_remote_id() else {
            debug!(local_event_id, status = %current.status, "no remote appointment known for mapping");
            return SyncResult::failed(format!(
                "no remote appointment is known for event {local_event_id}; purge the mapping to drop it"
            ));
        };

        match self.appointments.delete(remote_id).await {
            Ok(()) => SyncResult::dispatched(Some(remote_id.to_string())),
            Err(err) => SyncResult::failed(err.to_string()),
        }
    }
}
