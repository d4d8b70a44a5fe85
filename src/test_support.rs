//! Temporary fixture trees for unit tests

use crate::config::{AppState, Config};
use crate::routing::load_routes;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Default configuration pointed at `root`, with access logging off
pub fn test_config(root: &Path) -> Config {
    let mut cfg = Config::load_from("does-not-exist").unwrap();
    cfg.mocks.root = root.to_path_buf();
    cfg.logging.access_log = false;
    cfg
}

/// Load the fixture tree in `mocks` into a ready-to-serve state
pub fn test_state(mocks: &MockDir) -> AppState {
    let cfg = test_config(mocks.path());
    let routes = load_routes(&cfg.mocks.root, &cfg.mocks.marker).unwrap();
    AppState::new(cfg, routes)
}

/// A scratch directory under the system temp dir, removed on drop
pub struct MockDir {
    path: PathBuf,
}

impl MockDir {
    pub fn new() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "fixture-mock-server-{}-{id}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `content` to `relative`, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let file = self.path.join(relative);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&file, content).unwrap();
        file
    }
}

impl Drop for MockDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
