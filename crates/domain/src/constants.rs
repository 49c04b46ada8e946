//! Domain constants
//!
//! Defaults for the remote platform and the sync subsystem.

/// Base URL of the CRM platform REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://services.leadconnectorhq.com";

/// Value sent in the `Version` header on every REST call.
pub const DEFAULT_API_VERSION: &str = "2021-07-28";

/// Upper bound for a single outbound HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default connection pool size for the mapping database.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Error reported when a deletion targets an event that was never synced.
pub const NO_MAPPING_ERROR: &str = "no mapping found";

/// Fallback error text so a failed mapping never carries an empty error.
pub const UNKNOWN_SYNC_ERROR: &str = "unknown sync error";
