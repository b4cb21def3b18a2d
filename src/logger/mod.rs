//! Logger module
//!
//! Provides logging utilities for the application including:
//! - Server lifecycle logging
//! - Access logging
//! - Constant registration diagnostics
//! - Error and warning logging
//!
//! Everything is emitted as `tracing` events; `init` installs the subscriber.

use std::net::SocketAddr;

use hyper::{Method, Uri, Version};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::FieldAccessError;

/// Initialize the global subscriber
///
/// Should be called once at application startup. `RUST_LOG` takes precedence
/// over `logging.level`.
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    info!("======================================");
    info!("Async server started successfully");
    info!("Listening on: http://{addr}");
    info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        info!("Worker threads: {workers}");
    }
    info!("Session cookie: {}", config.session.cookie_name);
    info!("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    info!(%peer_addr, "[Connection] Accepted");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    error!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    error!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    warn!("[WARN] {message}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    info!("[Request] {method} {uri} {version:?}");
}

pub fn log_response(status: u16, size: usize) {
    info!("[Response] {status} - {size} bytes");
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        info!("[Headers] Count: {count}");
    }
}

pub fn log_class_not_found(class_name: &str) {
    error!(class = class_name, "ClassNotFound:[{class_name}]. And this class will be ignored");
}

pub fn log_illegal_field_access(err: &FieldAccessError) {
    error!(
        class = %err.class,
        field = %err.field,
        "Illegal access of field:[{}->{}]. And this field will be ignored",
        err.class,
        err.field
    );
}

pub fn log_short_name_collision(short_name: &str, replaced: &str, by: &str) {
    warn!(
        short_name,
        replaced, by, "Constants of [{replaced}] replaced by [{by}] under the same name [{short_name}]"
    );
}

pub fn log_catalog_loaded(path: &str, declared: usize, known: usize) {
    info!(path, declared, known, "[Context] Constant catalog loaded");
}

pub fn log_constants_registered(published: usize, diagnostics: usize) {
    info!(published, diagnostics, "[Context] Constants registered");
}

pub fn log_context_destroyed(published: usize) {
    info!(published, "[Context] Application context destroyed");
}

pub fn log_new_session(id: &str) {
    info!(session = id, "[Session] Created");
}

pub fn log_shutdown_requested(signal: &str) {
    info!("[SIGNAL] {signal} received, shutting down");
}
