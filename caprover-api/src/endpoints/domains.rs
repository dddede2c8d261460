//! Domain and certificate endpoints.

use serde_json::json;
use tracing::info;

use caprover_core::constants::paths;
use caprover_core::error::CaproverResult;

use crate::client::CaproverClient;

impl CaproverClient {
    /// Issue a certificate for the app's default subdomain.
    pub async fn enable_base_domain_ssl(&self, app_name: &str) -> CaproverResult<()> {
        info!("enabling SSL on base domain of {app_name}");
        let body = json!({ "appName": app_name });
        self.post_checked(paths::ENABLE_BASE_DOMAIN_SSL, Some(&body))
            .await
    }

    /// Attach a custom domain to an app.
    pub async fn add_custom_domain(&self, app_name: &str, domain: &str) -> CaproverResult<()> {
        info!("adding custom domain {domain} to {app_name}");
        let body = json!({ "appName": app_name, "customDomain": domain });
        self.post_checked(paths::CUSTOM_DOMAIN, Some(&body)).await
    }

    /// Issue a certificate for a custom domain already attached to an app.
    pub async fn enable_custom_domain_ssl(&self, app_name: &str, domain: &str) -> CaproverResult<()> {
        info!("enabling SSL on custom domain {domain} of {app_name}");
        let body = json!({ "appName": app_name, "customDomain": domain });
        self.post_checked(paths::ENABLE_CUSTOM_DOMAIN_SSL, Some(&body))
            .await
    }
}
