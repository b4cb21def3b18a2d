// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, ContextConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
    SessionConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Environment overrides use `SERVER_<SECTION>__<KEY>`, e.g.
    /// `SERVER_CONTEXT__CONSTANT_CLASS_NAME`
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "irregular/0.1")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("session.cookie_name", "SESSIONID")?
            .set_default("session.timeout_secs", 1800)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.session.cookie_name, "SESSIONID");
        assert_eq!(cfg.session.timeout_secs, 1800);
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert!(cfg.get_socket_addr().is_ok());
    }

    #[test]
    fn test_invalid_socket_addr() {
        let mut cfg = Config::load_from("does-not-exist/config").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
