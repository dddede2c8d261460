//! Build and runtime log endpoints.

use serde::Deserialize;
use tracing::info;

use caprover_core::constants::paths;
use caprover_core::error::CaproverResult;

use crate::client::CaproverClient;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildLogLines {
    lines: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildLogData {
    logs: BuildLogLines,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppLogData {
    logs: String,
}

impl CaproverClient {
    /// Latest build output for an app, one line per `\n`.
    pub async fn build_logs(&self, app_name: &str) -> CaproverResult<String> {
        info!("fetching build logs for {app_name}");
        let data: BuildLogData = self.get_data(&paths::build_logs(app_name)).await?;
        Ok(data.logs.lines.join("\n"))
    }

    /// Runtime output of an app's containers, as joined by the server.
    pub async fn app_logs(&self, app_name: &str) -> CaproverResult<String> {
        info!("fetching app logs for {app_name}");
        let data: AppLogData = self.get_data(&paths::app_logs(app_name)).await?;
        Ok(data.logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_log_data_deserialize() {
        let data: BuildLogData = serde_json::from_value(json!({
            "isAppBuilding": false,
            "isBuildFailed": false,
            "logs": {"firstLineNumber": 0, "lines": ["step 1", "step 2"]}
        }))
        .unwrap();
        assert_eq!(data.logs.lines, vec!["step 1", "step 2"]);
    }

    #[test]
    fn test_app_log_data_missing_logs_is_empty() {
        let data: AppLogData = serde_json::from_value(json!({})).unwrap();
        assert!(data.logs.is_empty());
    }
}
