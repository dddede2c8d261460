//! App definition endpoints: list, lookup, register, update, delete.

use serde_json::json;
use tracing::info;

use caprover_core::constants::paths;
use caprover_core::error::{CaproverError, CaproverResult};

use crate::client::CaproverClient;
use crate::models::{AppDefinition, AppListing, UpdateAppRequest};

impl CaproverClient {
    /// List every app plus the root domain metadata. Not paginated.
    pub async fn list_apps(&self) -> CaproverResult<AppListing> {
        info!("listing app definitions");
        self.get_data(paths::APP_LIST).await
    }

    /// Get one app by exact, case-sensitive name.
    ///
    /// A failed list call is returned as-is rather than reported as
    /// `NotFound`.
    pub async fn get_app(&self, app_name: &str) -> CaproverResult<AppDefinition> {
        let listing = self.list_apps().await?;
        listing
            .app_definitions
            .into_iter()
            .find(|a| a.app_name == app_name)
            .ok_or_else(|| CaproverError::NotFound(app_name.to_string()))
    }

    /// The current definition of an app projected to an update request.
    ///
    /// Submitting it unchanged leaves the app's configuration as it is.
    pub async fn default_update_request(&self, app_name: &str) -> CaproverResult<UpdateAppRequest> {
        let app = self.get_app(app_name).await?;
        Ok(UpdateAppRequest::from(&app))
    }

    /// Register a new, empty app.
    pub async fn create_app(&self, app_name: &str, has_persistent_data: bool) -> CaproverResult<()> {
        info!("creating app {app_name} (persistent data: {has_persistent_data})");
        let body = json!({
            "appName": app_name,
            "hasPersistentData": has_persistent_data,
        });
        self.post_checked(paths::APP_REGISTER, Some(&body)).await
    }

    /// Replace an app's mutable configuration with `request`.
    pub async fn update_app(&self, request: &UpdateAppRequest) -> CaproverResult<()> {
        info!("updating app {}", request.app_name);
        let body = serde_json::to_value(request)
            .map_err(|e| CaproverError::Serialization(e.to_string()))?;
        self.post_checked(paths::APP_UPDATE, Some(&body)).await
    }

    /// Delete an app.
    pub async fn remove_app(&self, app_name: &str) -> CaproverResult<()> {
        info!("removing app {app_name}");
        let body = json!({ "appName": app_name });
        self.post_checked(paths::APP_DELETE, Some(&body)).await
    }
}
