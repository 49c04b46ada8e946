//! Remote-side shapes: contacts and appointments on the CRM platform

use serde::{Deserialize, Serialize};

/// Contact record on the remote platform.
///
/// Fetched on demand for a single sync operation and never cached, because
/// contact data can change remotely between syncs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContact {
    pub remote_contact_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Appointment payload sent to the remote platform.
///
/// `contact_id` is only required on creation; updates send a partial
/// appointment without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub calendar_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub title: String,
    pub notes: String,
}
