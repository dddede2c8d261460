//! CapRover Core - error handling, configuration, logging, and wire constants.
//!
//! This crate provides the shared foundation used by the API client:
//! - Client configuration (endpoint, credential, timeouts, logging)
//! - The error taxonomy every client call returns
//! - Structured logging helpers built on tracing
//! - Fixed API paths, headers, and status codes

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::{Config, LoggingConfig, ServerConfig};
pub use error::{CaproverError, CaproverResult};
pub use logging::init_logging;
