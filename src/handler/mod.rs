//! Request handler module
//!
//! Routes requests to the SWIS mock endpoints and serves their canned payloads.

mod fixtures;
pub mod router;
pub mod swis;

// Re-export main entry point
pub use router::{handle_request, CHANGE_IP_STATUS_PATH, FIRST_AVAILABLE_IP_PATH, QUERY_PATH};
