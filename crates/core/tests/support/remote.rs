//! Mock remote-platform adapters

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use eventsync_core::{AppointmentClient, ContactResolver};
use eventsync_domain::{Appointment, EventSyncError, RemoteContact, Result as DomainResult};

/// Contact resolver answering from fixed email and phone tables.
#[derive(Default, Clone)]
pub struct MockContactResolver {
    by_email: HashMap<String, String>,
    by_phone: HashMap<String, String>,
    lookups: Arc<AtomicUsize>,
}

impl MockContactResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: &str, contact_id: &str) -> Self {
        self.by_email.insert(email.to_string(), contact_id.to_string());
        self
    }

    pub fn with_phone(mut self, phone: &str, contact_id: &str) -> Self {
        self.by_phone.insert(phone.to_string(), contact_id.to_string());
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactResolver for MockContactResolver {
    async fn resolve(&self, email: &str, phone: Option<&str>) -> DomainResult<RemoteContact> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let found = self
            .by_email
            .get(email)
            .or_else(|| phone.and_then(|phone| self.by_phone.get(phone)));
        match found {
            Some(id) => Ok(RemoteContact {
                remote_contact_id: id.clone(),
                email: Some(email.to_string()),
                phone: phone.map(str::to_string),
                first_name: None,
                last_name: None,
            }),
            None => Err(EventSyncError::ContactNotFound),
        }
    }
}

/// One recorded call against the appointment API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentCall {
    Create(Appointment),
    Update(String, Appointment),
    Delete(String),
}

/// Appointment client that records calls and hands out sequential ids.
#[derive(Clone)]
pub struct MockAppointmentClient {
    calls: Arc<Mutex<Vec<AppointmentCall>>>,
    next_id: Arc<AtomicUsize>,
    failure: Option<(u16, String)>,
    delay: Option<Duration>,
}

impl Default for MockAppointmentClient {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            next_id: Arc::new(AtomicUsize::new(1)),
            failure: None,
            delay: None,
        }
    }
}

impl MockAppointmentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call answers with this HTTP status and body.
    pub fn failing(status: u16, body: &str) -> Self {
        Self { failure: Some((status, body.to_string())), ..Self::default() }
    }

    /// Sleep before answering, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<AppointmentCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.calls().iter().filter(|call| matches!(call, AppointmentCall::Create(_))).count()
    }

    async fn answer(&self, call: AppointmentCall) -> DomainResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, body)) => {
                Err(EventSyncError::RemoteApi { status: *status, body: body.clone() })
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AppointmentClient for MockAppointmentClient {
    async fn create(&self, appointment: &Appointment) -> DomainResult<String> {
        self.answer(AppointmentCall::Create(appointment.clone())).await?;
        Ok(format!("appt-{}", self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn update(&self, remote_id: &str, appointment: &Appointment) -> DomainResult<()> {
        self.answer(AppointmentCall::Update(remote_id.to_string(), appointment.clone())).await
    }

    async fn delete(&self, remote_id: &str) -> DomainResult<()> {
        self.answer(AppointmentCall::Delete(remote_id.to_string())).await
    }
}
