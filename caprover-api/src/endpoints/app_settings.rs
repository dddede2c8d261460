//! Single-setting changes built on read-modify-write.
//!
//! Each method fetches the app's current update projection, changes one
//! field and submits the whole projection. The fetch and the submit are two
//! separate requests; a change made by someone else in between is overwritten.

use tracing::debug;

use caprover_core::error::{CaproverError, CaproverResult};

use crate::client::CaproverClient;
use crate::models::{RepoInfo, ResourceLimits, ServiceUpdateOverride, UpdateAppRequest};

impl CaproverClient {
    /// Fetch, apply `change`, submit.
    pub async fn modify_app<F>(&self, app_name: &str, change: F) -> CaproverResult<()>
    where
        F: FnOnce(&mut UpdateAppRequest),
    {
        let mut request = self.default_update_request(app_name).await?;
        change(&mut request);
        debug!("submitting modified definition for {app_name}");
        self.update_app(&request).await
    }

    pub async fn enable_websocket_support(&self, app_name: &str) -> CaproverResult<()> {
        self.modify_app(app_name, |r| r.websocket_support = true)
            .await
    }

    pub async fn disable_websocket_support(&self, app_name: &str) -> CaproverResult<()> {
        self.modify_app(app_name, |r| r.websocket_support = false)
            .await
    }

    /// Redirect plain HTTP to HTTPS.
    pub async fn enable_force_https(&self, app_name: &str) -> CaproverResult<()> {
        self.modify_app(app_name, |r| r.force_ssl = true).await
    }

    pub async fn disable_force_https(&self, app_name: &str) -> CaproverResult<()> {
        self.modify_app(app_name, |r| r.force_ssl = false).await
    }

    /// Stop all of an app's containers.
    pub async fn turn_instance_count_zero(&self, app_name: &str) -> CaproverResult<()> {
        self.modify_app(app_name, |r| r.instance_count = 0).await
    }

    /// Run exactly one container for an app.
    pub async fn turn_instance_count_one(&self, app_name: &str) -> CaproverResult<()> {
        self.modify_app(app_name, |r| r.instance_count = 1).await
    }

    /// Replace the repository the push webhook deploys from.
    pub async fn update_repo_info(&self, app_name: &str, repo_info: RepoInfo) -> CaproverResult<()> {
        self.modify_app(app_name, move |r| r.app_push_webhook.repo_info = repo_info)
            .await
    }

    /// Change the port the app listens on inside its container.
    pub async fn update_container_http_port(&self, app_name: &str, port: u16) -> CaproverResult<()> {
        self.modify_app(app_name, |r| r.container_http_port = port)
            .await
    }

    /// Cap memory (megabytes) and CPU (whole or fractional CPUs).
    ///
    /// Replaces any existing service override with one that only sets these
    /// limits. Out-of-range amounts fail with `InvalidInput` before any
    /// request is sent.
    pub async fn set_resource_constraints(
        &self,
        app_name: &str,
        memory_mb: i64,
        cpus: f64,
    ) -> CaproverResult<()> {
        let limits = ResourceLimits::from_units(memory_mb, cpus)?;
        let blob = ServiceUpdateOverride::with_limits(limits)
            .to_json_string()
            .map_err(|e| CaproverError::Serialization(e.to_string()))?;
        self.modify_app(app_name, move |r| r.service_update_override = blob)
            .await
    }

    /// Resubmit the current definition unchanged, which redeploys the
    /// app's service.
    pub async fn restart_app(&self, app_name: &str) -> CaproverResult<()> {
        self.modify_app(app_name, |_| {}).await
    }
}
