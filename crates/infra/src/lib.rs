//! # EventSync Infrastructure
//!
//! Infrastructure implementations of the core sync ports.
//!
//! This crate contains:
//! - The SQLite mapping store (r2d2 pool) and an in-memory store
//! - The CRM REST client (contact search, appointments)
//! - The webhook dispatcher strategy
//! - Configuration loading, logging setup and the coordinator factory
//!
//! ## Architecture
//! - Implements traits defined in `eventsync-core`
//! - Contains all "impure" code (I/O, HTTP, SQL)

pub mod config;
pub mod database;
pub mod errors;
pub mod factory;
pub mod http;
pub mod integrations;
pub mod observability;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use factory::{build_coordinator, build_from_config, open_store};
pub use http::*;
pub use integrations::*;
pub use observability::{init_tracing, LogFormat};
