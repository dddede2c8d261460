//! CapRover API - HTTP client for the CapRover control-plane REST API.
//!
//! Covers session login, app listing and lookup, app registration, update
//! and removal, domains and certificates, build triggers, and logs. Single
//! setting changes (websocket support, forced HTTPS, instance count,
//! repository, port, resource limits) are composed from a read-modify-write
//! over the app's update projection.
//!
//! ```no_run
//! # async fn demo() -> caprover_core::CaproverResult<()> {
//! use caprover_api::CaproverClient;
//! use caprover_core::ServerConfig;
//!
//! let client = CaproverClient::connect(&ServerConfig::new("https://captain.example.com", "pw")).await?;
//! client.enable_websocket_support("web").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod models;
pub mod response;
pub mod transport;

// Re-export key types
pub use client::CaproverClient;
pub use models::{AppDefinition, AppListing, RepoInfo, UpdateAppRequest};
pub use response::Envelope;
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
