//! Webhook-triggered automation strategy

pub mod dispatcher;

pub use dispatcher::{WebhookDispatcher, WebhookEventData};
