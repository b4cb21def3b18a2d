// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub context: ContextConfig,
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
}

/// Connection handling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Application context parameters, read once at startup
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ContextConfig {
    /// Comma separated, fully-qualified constant class names
    #[serde(default, alias = "constantClassName")]
    pub constant_class_name: Option<String>,
    /// TOML file declaring additional constant classes
    #[serde(default)]
    pub catalog_file: Option<String>,
}

/// Session tracking configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Idle time after which a session is discarded
    pub timeout_secs: u64,
}
