//! CRM platform REST integration
//!
//! Implements the contact and appointment ports of `eventsync-core` against
//! the platform's v2 REST API (bearer token plus a fixed `Version` header).

pub mod appointments;
pub mod client;
pub mod contacts;
pub mod types;

pub use client::CrmClient;
