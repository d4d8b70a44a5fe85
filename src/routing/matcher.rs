//! Route matching module
//!
//! Exact path and method matching over the ordered route table.

use super::{Method, Route, RouteTable};

impl RouteTable {
    /// Find the first route answering `path` with `method`.
    ///
    /// Paths compare byte for byte: no trailing-slash folding, no decoding.
    /// A route with the right path but without the method does not end the
    /// scan, so a later route for the same path can still answer.
    pub fn match_route(&self, path: &str, method: Method) -> Option<&Route> {
        self.routes()
            .iter()
            .find(|route| route.url_path == path && route.supports(method))
    }
}
