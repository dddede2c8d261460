//! Wire types for app definitions and update requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use caprover_core::constants::{RESOURCE_ONE_CPU, RESOURCE_ONE_MB};
use caprover_core::error::{CaproverError, CaproverResult};

/// Decode an explicit `null` as the type's zero value.
///
/// `#[serde(default)]` only covers absent keys; the server also sends `null`
/// for fields it never set.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A directory mounted into an app's containers.
///
/// Either a named volume (`volume_name`) or a bind mount of a host directory
/// (`host_path`); the unused one is left out of the wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    #[serde(deserialize_with = "null_as_default")]
    pub container_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_path: Option<String>,
}

/// A host-to-container port mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortMapping {
    pub host_port: u16,
    pub container_port: u16,
    /// `"udp"` for UDP mappings; absent means TCP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// A single environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVar {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// Source repository and credentials used by the push webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepoInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub repo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ssh_key: String,
}

/// Whether deploys may be triggered with an app token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppDeployTokenConfig {
    pub enabled: bool,
}

/// A custom domain attached to an app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomDomain {
    pub public_domain: String,
    pub has_ssl: bool,
}

/// One entry of an app's deployment history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppVersion {
    pub version: u32,
    pub time_stamp: Option<DateTime<Utc>>,
    pub deployed_image_name: Option<String>,
    pub git_hash: Option<String>,
}

/// Push-webhook configuration as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppPushWebhook {
    #[serde(deserialize_with = "null_as_default")]
    pub token_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub push_webhook_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repo_info: RepoInfo,
}

/// Push-webhook section of an update request; only the repo is writable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateWebhook {
    pub repo_info: RepoInfo,
}

/// Everything the server stores for one app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppDefinition {
    #[serde(deserialize_with = "null_as_default")]
    pub app_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub has_persistent_data: bool,
    pub instance_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub captain_definition_relative_file_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub networks: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub env_vars: Vec<EnvVar>,
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: Vec<Volume>,
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<PortMapping>,
    #[serde(deserialize_with = "null_as_default")]
    pub versions: Vec<AppVersion>,
    pub deployed_version: u32,
    pub not_expose_as_web_app: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_domain: Vec<CustomDomain>,
    pub has_default_sub_domain_ssl: bool,
    pub force_ssl: bool,
    pub websocket_support: bool,
    pub container_http_port: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub node_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pre_deploy_function: String,
    /// Opaque orchestrator override, a JSON document serialized as a string.
    #[serde(deserialize_with = "null_as_default")]
    pub service_update_override: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app_deploy_token_config: AppDeployTokenConfig,
    pub is_app_building: bool,
    pub app_push_webhook: Option<AppPushWebhook>,
}

impl AppDefinition {
    /// The version currently deployed, if it appears in the history.
    pub fn deployed(&self) -> Option<&AppVersion> {
        self.versions
            .iter()
            .find(|v| v.version == self.deployed_version)
    }
}

/// `data` payload of the app list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppListing {
    #[serde(deserialize_with = "null_as_default")]
    pub app_definitions: Vec<AppDefinition>,
    #[serde(deserialize_with = "null_as_default")]
    pub root_domain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub default_nginx_config: String,
}

impl AppListing {
    /// Exact, case-sensitive lookup by app name.
    pub fn find(&self, app_name: &str) -> Option<&AppDefinition> {
        self.app_definitions.iter().find(|a| a.app_name == app_name)
    }
}

/// The mutable subset of an [`AppDefinition`].
///
/// The update endpoint replaces every one of these fields, so a request must
/// always start from the current definition (see
/// `CaproverClient::default_update_request`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppRequest {
    pub app_name: String,
    pub instance_count: u32,
    pub captain_definition_relative_file_path: String,
    pub not_expose_as_web_app: bool,
    pub force_ssl: bool,
    pub websocket_support: bool,
    pub volumes: Vec<Volume>,
    pub ports: Vec<PortMapping>,
    pub app_push_webhook: UpdateWebhook,
    pub node_id: String,
    pub pre_deploy_function: String,
    pub service_update_override: String,
    pub container_http_port: u16,
    pub description: String,
    pub env_vars: Vec<EnvVar>,
    pub app_deploy_token_config: AppDeployTokenConfig,
}

impl From<&AppDefinition> for UpdateAppRequest {
    fn from(app: &AppDefinition) -> Self {
        Self {
            app_name: app.app_name.clone(),
            instance_count: app.instance_count,
            captain_definition_relative_file_path: app
                .captain_definition_relative_file_path
                .clone(),
            not_expose_as_web_app: app.not_expose_as_web_app,
            force_ssl: app.force_ssl,
            websocket_support: app.websocket_support,
            volumes: app.volumes.clone(),
            ports: app.ports.clone(),
            app_push_webhook: UpdateWebhook {
                repo_info: app
                    .app_push_webhook
                    .as_ref()
                    .map(|w| w.repo_info.clone())
                    .unwrap_or_default(),
            },
            node_id: app.node_id.clone(),
            pre_deploy_function: app.pre_deploy_function.clone(),
            service_update_override: app.service_update_override.clone(),
            container_http_port: app.container_http_port,
            description: app.description.clone(),
            env_vars: app.env_vars.clone(),
            app_deploy_token_config: app.app_deploy_token_config.clone(),
        }
    }
}

/// Resource limits in orchestrator units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    #[serde(rename = "MemoryBytes")]
    pub memory_bytes: i64,
    #[serde(rename = "NanoCPUs")]
    pub nano_cpus: i64,
}

impl ResourceLimits {
    /// Convert megabytes and (fractional) CPUs to bytes and nano-CPUs.
    ///
    /// The CPU product is truncated toward zero. Negative, non-finite or
    /// out-of-range amounts are rejected.
    pub fn from_units(memory_mb: i64, cpus: f64) -> CaproverResult<Self> {
        if memory_mb < 0 {
            return Err(CaproverError::InvalidInput(format!(
                "memory limit must not be negative: {memory_mb} MB"
            )));
        }
        let memory_bytes = memory_mb.checked_mul(RESOURCE_ONE_MB).ok_or_else(|| {
            CaproverError::InvalidInput(format!("memory limit too large: {memory_mb} MB"))
        })?;

        let nano = cpus * RESOURCE_ONE_CPU as f64;
        if !nano.is_finite() || nano < 0.0 || nano >= i64::MAX as f64 {
            return Err(CaproverError::InvalidInput(format!(
                "cpu limit out of range: {cpus}"
            )));
        }

        Ok(Self {
            memory_bytes,
            nano_cpus: nano as i64,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideResources {
    #[serde(rename = "Limits")]
    pub limits: ResourceLimits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideTaskTemplate {
    #[serde(rename = "Resources")]
    pub resources: OverrideResources,
}

/// The orchestrator service override carried in `serviceUpdateOverride`:
/// `{"TaskTemplate":{"Resources":{"Limits":{"MemoryBytes":..,"NanoCPUs":..}}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUpdateOverride {
    #[serde(rename = "TaskTemplate")]
    pub task_template: OverrideTaskTemplate,
}

impl ServiceUpdateOverride {
    /// Override that only sets resource limits.
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            task_template: OverrideTaskTemplate {
                resources: OverrideResources { limits },
            },
        }
    }

    /// Serialize to the string form the update endpoint expects.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
