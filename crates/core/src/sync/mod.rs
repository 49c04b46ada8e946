//! Outbound event synchronization

pub mod coordinator;
pub mod direct_api;
pub mod keyed_lock;
pub mod ports;
