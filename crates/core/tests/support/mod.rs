//! Shared test helpers for `eventsync-core` integration tests.
//!
//! In-memory fakes for every core port plus event fixtures, so coordinator
//! tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod events;
pub mod remote;
pub mod repositories;
