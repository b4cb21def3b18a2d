//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from handlers and views.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_413_response, build_500_response,
    build_html_response, build_options_response,
};
