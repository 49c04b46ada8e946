//! Wire types for the CRM REST API

use eventsync_domain::{Appointment, RemoteContact};
use serde::{Deserialize, Serialize};

/// Response of the duplicate-contact search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DuplicateSearchResponse {
    #[serde(default)]
    pub contact: Option<ContactRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<ContactRecord> for RemoteContact {
    fn from(record: ContactRecord) -> Self {
        Self {
            remote_contact_id: record.id,
            email: record.email,
            phone: record.phone,
            first_name: record.first_name,
            last_name: record.last_name,
        }
    }
}

/// Appointment body for create and update calls
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest<'a> {
    pub location_id: &'a str,
    #[serde(flatten)]
    pub appointment: &'a Appointment,
}

/// Response of the appointment create endpoint.
///
/// Depending on the API revision the id is either top-level or nested.
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub appointment: Option<AppointmentRef>,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentRef {
    pub id: String,
}

impl AppointmentResponse {
    pub fn into_id(self) -> Option<String> {
        self.id
            .or_else(|| self.appointment.map(|nested| nested.id))
            .filter(|id| !id.trim().is_empty())
    }
}
