//! API endpoint modules organized by category.
//!
//! Each module adds typed methods to `CaproverClient` for a group of related
//! server endpoints.

pub mod app_settings;
pub mod apps;
pub mod builds;
pub mod domains;
pub mod logs;
