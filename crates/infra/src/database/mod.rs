//! Mapping store implementations

pub mod manager;
pub mod memory_store;
pub mod sync_mapping_repository;

pub use manager::*;
pub use memory_store::*;
pub use sync_mapping_repository::*;
