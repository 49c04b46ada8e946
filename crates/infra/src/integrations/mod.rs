//! External service integrations

pub mod crm;
pub mod webhook;

pub use crm::CrmClient;
pub use webhook::{WebhookDispatcher, WebhookEventData};
