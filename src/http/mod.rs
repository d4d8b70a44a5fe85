//! HTTP protocol layer module
//!
//! Provides HTTP response builders, decoupled from fixture handling.

pub mod response;

// Re-export commonly used types
pub use response::{build_404_response, build_500_response, build_json_response};
