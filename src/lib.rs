//! Publishes constant classes to server-rendered views.
//!
//! At startup the [`listener::ConstantListener`] resolves the classes named by
//! the `constantClassName` init parameter and publishes their fields in the
//! [`context::WebContext`], keyed by short class name. Views then address a
//! constant as `ClassName.FIELD`. The demo handler at `/TestConstantListener`
//! stores a value in the session under such a constant and forwards to a view
//! that reads it back.

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod handler;
pub mod http;
pub mod listener;
pub mod logger;
pub mod server;
pub mod session;
pub mod view;
