//! Fixture loading module
//!
//! Fixtures are read fresh on every matching request. Nothing is cached, so
//! edits to a fixture's content show up on the next request.

use crate::error::FixtureError;
use crate::routing::Method;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Read `path` and return the JSON-encoded value under `method`
pub async fn read_fixture_value(path: &Path, method: Method) -> Result<Vec<u8>, FixtureError> {
    let content = fs::read(path).await.map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_slice(&content).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(mut map) = document else {
        return Err(FixtureError::NotAnObject(path.to_path_buf()));
    };

    let value = map
        .remove(method.as_str())
        .ok_or_else(|| FixtureError::MissingMethod {
            path: path.to_path_buf(),
            method: method.to_string(),
        })?;

    serde_json::to_vec(&value).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
