//! HTTP protocol layer module
//!
//! Response builders shared by every route, decoupled from the SWIS fixtures.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_health_response, build_json_response, build_text_response,
};
