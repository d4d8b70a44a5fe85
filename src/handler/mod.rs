//! Request handler module
//!
//! Responsible for matching requests against the route table and answering
//! from the fixture files on disk.

pub mod fixture;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
