//! Calendar event fixtures

use chrono::{TimeZone, Utc};
use eventsync_domain::CalendarEvent;

/// The canonical onboarding event used across the coordinator tests.
pub fn onboarding_event(local_id: &str) -> CalendarEvent {
    let created = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();
    CalendarEvent {
        local_id: local_id.to_string(),
        client_id: "client-1".to_string(),
        client_email: "a@b.com".to_string(),
        client_phone: None,
        client_name: "Ada Lovelace".to_string(),
        title: "Onboarding call".to_string(),
        category: "onboarding".to_string(),
        start_date: "2025-09-01".to_string(),
        end_date: "2025-09-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        description: None,
        created_at: created,
        updated_at: created,
    }
}

/// Same event with a phone number attached.
pub fn with_phone(mut event: CalendarEvent, phone: &str) -> CalendarEvent {
    event.client_phone = Some(phone.to_string());
    event
}
