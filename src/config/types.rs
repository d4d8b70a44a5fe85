// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub mocks: MocksConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Fixture tree configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MocksConfig {
    /// Directory walked once at startup
    pub root: PathBuf,
    /// File name that marks a directory as an endpoint
    pub marker: String,
    /// Exit the process when a fixture can't be served instead of answering 500
    pub fatal_fixture_errors: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (short, combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
    /// Print the discovered route table at startup
    pub show_routes: bool,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "short".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub connection_timeout: u64,
}
