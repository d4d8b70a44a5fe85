// Application state module
// Immutable state shared by every connection task

use super::types::Config;
use crate::routing::RouteTable;

/// Application state
///
/// Built once before the listener accepts anything and never mutated, so
/// connection tasks read it through an `Arc` without locking.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    pub const fn new(config: Config, routes: RouteTable) -> Self {
        Self { config, routes }
    }
}
