//! Routing module
//!
//! Provides file-system defined routing:
//! - Route discovery from fixture files under the mock root
//! - Exact path + method matching against the discovered table

mod loader;
mod matcher;

pub use loader::load_routes;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// HTTP methods a fixture file may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Parse a fixture key. Only the exact upper-case names are recognized.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == key)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&hyper::Method> for Method {
    type Error = ();

    fn try_from(method: &hyper::Method) -> Result<Self, Self::Error> {
        Self::from_key(method.as_str()).ok_or(())
    }
}

/// A single mocked endpoint bound to one fixture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Fixture file path relative to the mock root
    pub source_file: PathBuf,
    /// Exact request path this route answers
    pub url_path: String,
    /// Methods declared by the fixture, never empty
    pub methods: BTreeSet<Method>,
}

impl Route {
    pub fn supports(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    /// Methods as a display list, e.g. `[GET POST]`
    pub fn methods_label(&self) -> String {
        let names: Vec<&str> = self.methods.iter().map(|m| m.as_str()).collect();
        format!("[{}]", names.join(" "))
    }
}

/// Ordered, read-only set of routes discovered at startup
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    root: PathBuf,
    routes: Vec<Route>,
}

impl RouteTable {
    pub const fn new(root: PathBuf, routes: Vec<Route>) -> Self {
        Self { root, routes }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// On-disk location of a route's fixture file
    pub fn fixture_path(&self, route: &Route) -> PathBuf {
        self.root.join(&route.source_file)
    }
}
