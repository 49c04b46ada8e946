//! # EventSync Domain
//!
//! Domain types for outbound calendar-event synchronization.
//!
//! This crate contains:
//! - The read-only calendar event input and the remote appointment shape
//! - Sync mapping, status and result types
//! - Configuration structures and their validation
//! - The domain error type and Result alias
//!
//! ## Architecture
//! - No dependencies on other EventSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
