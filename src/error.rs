//! Error types
//!
//! `LoadError` covers the startup scan of the mock root and is always fatal.
//! `FixtureError` covers re-reading a fixture while serving a request.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while building the route table at startup
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("mock root '{}' does not exist or is not a directory", .0.display())]
    MissingRoot(PathBuf),

    #[error("fixture marker '{0}' must be a file name ending in .json")]
    InvalidMarker(String),

    #[error("failed to walk mock root: {0}")]
    Walk(#[from] glob::GlobError),

    #[error("invalid mock root pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read fixture '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fixture '{}' is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture '{}' must contain a JSON object at the top level", .0.display())]
    NotAnObject(PathBuf),
}

/// Failure while serving a matched route from its fixture file
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fixture '{}' is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture '{}' must contain a JSON object at the top level", .0.display())]
    NotAnObject(PathBuf),

    #[error("fixture '{}' no longer declares method {method}", path.display())]
    MissingMethod { path: PathBuf, method: String },
}
