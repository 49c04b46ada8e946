//! Domain types and models

pub mod appointment;
pub mod event;
pub mod mapping;
pub mod sync;

pub use appointment::{Appointment, RemoteContact};
pub use event::CalendarEvent;
pub use mapping::{MappingUpdate, SyncMapping, SyncStatus};
pub use sync::{ConfigStatus, LifecycleKind, SyncResult, SyncStatusReport};
