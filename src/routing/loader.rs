//! Route discovery module
//!
//! Walks the mock root once at startup and turns every fixture file into a
//! `Route`. The resulting table is never rebuilt while the server runs.

use super::{Method, Route, RouteTable};
use crate::error::LoadError;
use crate::logger;
use glob::{MatchOptions, Pattern};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

const FIXTURE_EXTENSION: &str = "json";

/// Build the route table from the fixture tree under `root`.
///
/// Every file named exactly `marker` becomes a route whose URL path mirrors
/// its directory relative to `root`. Fixtures declaring no recognized method
/// are dropped. Any unreadable or malformed fixture aborts the whole load.
pub fn load_routes(root: &Path, marker: &str) -> Result<RouteTable, LoadError> {
    validate_marker(marker)?;

    if !root.is_dir() {
        return Err(LoadError::MissingRoot(root.to_path_buf()));
    }

    // glob yields relative paths without a leading "./", so drop it from the root too
    let scan_root: PathBuf = root
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let pattern = if scan_root.as_os_str().is_empty() {
        format!("**/{}", Pattern::escape(marker))
    } else {
        format!(
            "{}/**/{}",
            Pattern::escape(&scan_root.to_string_lossy()),
            Pattern::escape(marker)
        )
    };

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut routes = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry?;
        if !path.is_file() {
            continue;
        }

        let Ok(source_file) = path.strip_prefix(&scan_root) else {
            logger::log_warning(&format!(
                "Skipping fixture outside mock root: {}",
                path.display()
            ));
            continue;
        };
        let source_file = source_file.to_path_buf();

        let methods = read_route_methods(&path)?;
        if methods.is_empty() {
            logger::log_warning(&format!(
                "Fixture {} declares no HTTP methods, skipping",
                path.display()
            ));
            continue;
        }

        let url_path = derive_url_path(source_file.parent().unwrap_or_else(|| Path::new("")));
        routes.push(Route {
            source_file,
            url_path,
            methods,
        });
    }

    Ok(RouteTable::new(root.to_path_buf(), routes))
}

/// Map a fixture directory (relative to the mock root) to its URL path.
///
/// `users/42` becomes `/users/42`; the root itself becomes `/`.
pub fn derive_url_path(relative_dir: &Path) -> String {
    let segments: Vec<String> = relative_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    format!("/{}", segments.join("/"))
}

fn validate_marker(marker: &str) -> Result<(), LoadError> {
    let path = Path::new(marker);
    let is_plain_name = path.file_name().and_then(|n| n.to_str()) == Some(marker);
    let has_extension = path.extension().and_then(|e| e.to_str()) == Some(FIXTURE_EXTENSION);

    if is_plain_name && has_extension {
        Ok(())
    } else {
        Err(LoadError::InvalidMarker(marker.to_string()))
    }
}

/// Collect the recognized method keys of one fixture file
fn read_route_methods(path: &Path) -> Result<BTreeSet<Method>, LoadError> {
    let content = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_slice(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(map) = document else {
        return Err(LoadError::NotAnObject(path.to_path_buf()));
    };

    Ok(map.keys().filter_map(|k| Method::from_key(k)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockDir;
    use rstest::rstest;

    #[rstest]
    #[case("", "/")]
    #[case("users", "/users")]
    #[case("a/b", "/a/b")]
    #[case("api/v1/orders", "/api/v1/orders")]
    fn test_derive_url_path(#[case] dir: &str, #[case] expected: &str) {
        assert_eq!(derive_url_path(Path::new(dir)), expected);
    }

    #[test]
    fn test_load_nested_and_root_fixtures() {
        let mocks = MockDir::new();
        mocks.write("endpoint.json", r#"{"GET": []}"#);
        mocks.write("users/endpoint.json", r#"{"GET": {"id": 1}, "POST": {}}"#);
        mocks.write("a/b/endpoint.json", r#"{"DELETE": null}"#);

        let table = load_routes(mocks.path(), "endpoint.json").unwrap();
        let mut paths: Vec<&str> = table.routes().iter().map(|r| r.url_path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["/", "/a/b", "/users"]);

        let users = table.routes().iter().find(|r| r.url_path == "/users").unwrap();
        assert_eq!(users.source_file, Path::new("users").join("endpoint.json"));
        assert!(users.supports(Method::Get));
        assert!(users.supports(Method::Post));
        assert!(!users.supports(Method::Put));
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let mocks = MockDir::new();
        mocks.write("things/endpoint.json", r#"{"GET": 1, "FOO": 2, "get": 3}"#);

        let table = load_routes(mocks.path(), "endpoint.json").unwrap();
        assert_eq!(table.len(), 1);
        let methods: Vec<Method> = table.routes()[0].methods.iter().copied().collect();
        assert_eq!(methods, vec![Method::Get]);
    }

    #[test]
    fn test_fixture_without_methods_is_dropped() {
        let mocks = MockDir::new();
        mocks.write("empty/endpoint.json", "{}");
        mocks.write("other/endpoint.json", r#"{"HEAD": "x"}"#);

        let table = load_routes(mocks.path(), "endpoint.json").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_only_exact_marker_name_is_loaded() {
        let mocks = MockDir::new();
        mocks.write("a/myendpoint.json", r#"{"GET": 1}"#);
        mocks.write("b/endpoint.json.bak", r#"{"GET": 1}"#);
        mocks.write("c/data.json", r#"{"GET": 1}"#);
        mocks.write("d/endpoint.json", r#"{"GET": 1}"#);

        let table = load_routes(mocks.path(), "endpoint.json").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.routes()[0].url_path, "/d");
    }

    #[test]
    fn test_invalid_json_aborts_load() {
        let mocks = MockDir::new();
        mocks.write("ok/endpoint.json", r#"{"GET": 1}"#);
        mocks.write("broken/endpoint.json", r#"{"GET": "#);

        let err = load_routes(mocks.path(), "endpoint.json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_non_object_fixture_aborts_load() {
        let mocks = MockDir::new();
        mocks.write("list/endpoint.json", "[1, 2]");

        let err = load_routes(mocks.path(), "endpoint.json").unwrap_err();
        assert!(matches!(err, LoadError::NotAnObject(_)));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let mocks = MockDir::new();
        let missing = mocks.path().join("does-not-exist");

        let err = load_routes(&missing, "endpoint.json").unwrap_err();
        assert!(matches!(err, LoadError::MissingRoot(_)));
    }

    #[rstest]
    #[case("endpoint.yaml")]
    #[case("nested/endpoint.json")]
    #[case("")]
    fn test_invalid_marker_rejected(#[case] marker: &str) {
        let mocks = MockDir::new();
        let err = load_routes(mocks.path(), marker).unwrap_err();
        assert!(matches!(err, LoadError::InvalidMarker(_)));
    }

    #[test]
    fn test_marker_directory_is_skipped() {
        let mocks = MockDir::new();
        mocks.write("trap/endpoint.json/inner.txt", "not a fixture");
        mocks.write("real/endpoint.json", r#"{"PUT": true}"#);

        let table = load_routes(mocks.path(), "endpoint.json").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.routes()[0].url_path, "/real");
    }

    #[test]
    fn test_table_root_is_kept_for_fixture_reads() {
        let mocks = MockDir::new();
        mocks.write("users/endpoint.json", r#"{"GET": 1}"#);

        let table = load_routes(mocks.path(), "endpoint.json").unwrap();
        let route = &table.routes()[0];
        assert!(table.fixture_path(route).is_file());
    }
}
