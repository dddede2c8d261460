//! Wire-level constants for the CapRover control-plane API.

/// Envelope status signalling success on every endpoint.
pub const STATUS_OK: i32 = 100;

/// Namespace sent in the `x-namespace` header and the build trigger query.
pub const NAMESPACE: &str = "captain";

/// Default API request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Default TCP connect timeout in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 15_000;

/// Bytes per megabyte as the orchestrator counts them.
pub const RESOURCE_ONE_MB: i64 = 1_048_576;

/// Nano-CPU units per whole CPU.
pub const RESOURCE_ONE_CPU: i64 = 1_000_000_000;

/// Request header names and fixed values.
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";
    pub const ACCEPT: &str = "Accept";
    pub const ACCEPT_ANY: &str = "application/json, text/plain, */*";
    pub const NAMESPACE: &str = "x-namespace";
    pub const AUTH: &str = "x-captain-auth";
}

/// API paths, relative to the configured endpoint.
pub mod paths {
    pub const LOGIN: &str = "/api/v2/login";
    pub const APP_LIST: &str = "/api/v2/user/apps/appDefinitions";
    pub const APP_REGISTER: &str = "/api/v2/user/apps/appDefinitions/register";
    pub const APP_UPDATE: &str = "/api/v2/user/apps/appDefinitions/update";
    pub const APP_DELETE: &str = "/api/v2/user/apps/appDefinitions/delete";
    pub const TRIGGER_BUILD: &str = "/api/v2/user/apps/webhooks/triggerbuild";
    pub const ENABLE_BASE_DOMAIN_SSL: &str = "/api/v2/user/apps/appDefinitions/enablebasedomainssl";
    pub const CUSTOM_DOMAIN: &str = "/api/v2/user/apps/appDefinitions/customdomain";
    pub const ENABLE_CUSTOM_DOMAIN_SSL: &str =
        "/api/v2/user/apps/appDefinitions/enablecustomdomainssl";
    pub const APP_DATA: &str = "/api/v2/user/apps/appData";

    /// Build log path for an app (note the trailing slash).
    pub fn build_logs(app_name: &str) -> String {
        format!("{APP_DATA}/{app_name}/")
    }

    /// Runtime log path for an app.
    pub fn app_logs(app_name: &str) -> String {
        format!("{APP_DATA}/{app_name}/logs")
    }
}
