//! Calendar event input owned by the host application

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{EventSyncError, Result};

/// Scheduling event as created by the host application.
///
/// This subsystem only reads it. Dates are `YYYY-MM-DD`, times `HH:MM` or
/// `HH:MM:SS`, optionally followed by `Z` or a `±HH:MM` offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub local_id: String,
    pub client_id: String,
    pub client_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    pub client_name: String,
    pub title: String,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// ISO-8601 start timestamp built from `start_date` and `start_time`.
    pub fn start_iso(&self) -> Result<String> {
        combine_date_time(&self.start_date, &self.start_time).map(|parts| parts.to_iso())
    }

    /// ISO-8601 end timestamp built from `end_date` and `end_time`.
    pub fn end_iso(&self) -> Result<String> {
        combine_date_time(&self.end_date, &self.end_time).map(|parts| parts.to_iso())
    }

    /// Start and end timestamps, rejecting an end that precedes the start.
    pub fn time_range(&self) -> Result<(String, String)> {
        let start = combine_date_time(&self.start_date, &self.start_time)?;
        let end = combine_date_time(&self.end_date, &self.end_time)?;

        if start.offset == end.offset && end.naive < start.naive {
            return Err(EventSyncError::InvalidInput(format!(
                "event {} ends before it starts",
                self.local_id
            )));
        }

        Ok((start.to_iso(), end.to_iso()))
    }

    /// Description to send as appointment notes.
    ///
    /// Falls back to a generated text naming the category and the client when
    /// the event has no (non-blank) description.
    pub fn notes(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("{} appointment with {}", capitalize(&self.category), self.client_name),
        }
    }

    /// Phone number, if one was supplied and is not blank.
    pub fn phone(&self) -> Option<&str> {
        self.client_phone.as_deref().map(str::trim).filter(|phone| !phone.is_empty())
    }
}

struct DateTimeParts<'a> {
    naive: NaiveDateTime,
    offset: &'a str,
}

impl DateTimeParts<'_> {
    fn to_iso(&self) -> String {
        format!("{}{}", self.naive.format("%Y-%m-%dT%H:%M:%S"), self.offset)
    }
}

fn combine_date_time<'a>(date: &str, time: &'a str) -> Result<DateTimeParts<'a>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|err| EventSyncError::InvalidInput(format!("invalid date '{date}': {err}")))?;

    let time = time.trim();
    let split = time.find(|c: char| matches!(c, 'Z' | '+' | '-')).unwrap_or(time.len());
    let (clock, offset) = time.split_at(split);

    if !is_valid_offset(offset) {
        return Err(EventSyncError::InvalidInput(format!("invalid time offset in '{time}'")));
    }

    let clock = NaiveTime::parse_from_str(clock, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
        .map_err(|err| EventSyncError::InvalidInput(format!("invalid time '{time}': {err}")))?;

    Ok(DateTimeParts { naive: date.and_time(clock), offset })
}

fn is_valid_offset(offset: &str) -> bool {
    match offset.as_bytes() {
        [] | [b'Z'] => true,
        [sign, h1, h2, b':', m1, m2] => {
            matches!(sign, b'+' | b'-') && [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_event() -> CalendarEvent {
        let stamp = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();
        CalendarEvent {
            local_id: "evt-1".into(),
            client_id: "client-1".into(),
            client_email: "a@b.com".into(),
            client_phone: None,
            client_name: "Ada Lovelace".into(),
            title: "Kickoff".into(),
            category: "onboarding".into(),
            start_date: "2025-09-01".into(),
            end_date: "2025-09-01".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            description: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn combines_date_and_time_without_conversion() {
        let event = sample_event();
        assert_eq!(event.start_iso().unwrap(), "2025-09-01T09:00:00");
        assert_eq!(event.end_iso().unwrap(), "2025-09-01T10:00:00");
    }

    #[test]
    fn keeps_offset_encoded_in_time_string() {
        let mut event = sample_event();
        event.start_time = "09:30:15+02:00".into();
        event.end_time = "10:00Z".into();

        assert_eq!(event.start_iso().unwrap(), "2025-09-01T09:30:15+02:00");
        assert_eq!(event.end_iso().unwrap(), "2025-09-01T10:00:00Z");
    }

    #[test]
    fn rejects_malformed_date_and_time() {
        let mut event = sample_event();
        event.start_date = "01/09/2025".into();
        assert!(matches!(event.start_iso(), Err(EventSyncError::InvalidInput(_))));

        let mut event = sample_event();
        event.end_time = "25:00".into();
        assert!(event.end_iso().is_err());

        let mut event = sample_event();
        event.end_time = "10:00+2".into();
        assert!(event.end_iso().is_err());
    }

    #[test]
    fn time_range_rejects_end_before_start() {
        let mut event = sample_event();
        event.end_time = "08:00".into();
        assert!(matches!(event.time_range(), Err(EventSyncError::InvalidInput(_))));

        let (start, end) = sample_event().time_range().unwrap();
        assert_eq!(start, "2025-09-01T09:00:00");
        assert_eq!(end, "2025-09-01T10:00:00");
    }

    #[test]
    fn notes_default_to_category_and_client() {
        let mut event = sample_event();
        assert_eq!(event.notes(), "Onboarding appointment with Ada Lovelace");

        event.description = Some("   ".into());
        assert_eq!(event.notes(), "Onboarding appointment with Ada Lovelace");

        event.description = Some("Bring the signed contract".into());
        assert_eq!(event.notes(), "Bring the signed contract");
    }

    #[test]
    fn blank_phone_is_treated_as_absent() {
        let mut event = sample_event();
        event.client_phone = Some("  ".into());
        assert_eq!(event.phone(), None);

        event.client_phone = Some("+15550100".into());
        assert_eq!(event.phone(), Some("+15550100"));
    }

    #[test]
    fn deserializes_camel_case_host_payload() {
        let json = r#"{
            "localId": "evt-9",
            "clientId": "c-9",
            "clientEmail": "x@y.com",
            "clientName": "Grace Hopper",
            "title": "Handover",
            "category": "handover",
            "startDate": "2025-10-01",
            "endDate": "2025-10-01",
            "startTime": "14:00",
            "endTime": "15:00",
            "createdAt": "2025-09-20T10:00:00Z",
            "updatedAt": "2025-09-21T10:00:00Z"
        }"#;

        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.local_id, "evt-9");
        assert_eq!(event.client_phone, None);
        assert_eq!(event.description, None);
    }
}
