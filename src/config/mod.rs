// Configuration module entry point
// Layers built-in defaults, an optional config file and MOCK_* environment variables

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Environment variable naming an alternative config file (without extension)
const CONFIG_PATH_ENV: &str = "MOCK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from `MOCK_CONFIG` or the default "config.toml"
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_layers(config_path, Self::environment())
    }

    /// `MOCK_SERVER__PORT=9100` sets `server.port`
    fn environment() -> config::Environment {
        config::Environment::with_prefix("MOCK")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_layers(config_path: &str, env: config::Environment) -> Result<Self, config::ConfigError> {
        let settings = Self::defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 9000)?
            .set_default("mocks.root", "mocks")?
            .set_default("mocks.marker", "endpoint.json")?
            .set_default("mocks.fatal_fixture_errors", false)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "short")?
            .set_default("logging.show_routes", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.connection_timeout", 30)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
