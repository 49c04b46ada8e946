//! # EventSync Core
//!
//! Business logic for outbound calendar-event synchronization - no
//! infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the mapping store, sync strategies and the
//!   remote platform's contact and appointment APIs
//! - The event sync coordinator
//! - The direct-API sync strategy
//!
//! ## Architecture Principles
//! - Only depends on `eventsync-domain`
//! - No database or HTTP code
//! - All external dependencies via traits

pub mod sync;

// Re-export specific items to avoid ambiguity
pub use sync::coordinator::EventSyncCoordinator;
pub use sync::direct_api::DirectApiStrategy;
pub use sync::keyed_lock::KeyedLocks;
pub use sync::ports::{AppointmentClient, ContactResolver, SyncMappingStore, SyncStrategy};
