//! Shared test utilities for integration tests.
#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

use caprover_api::{AppDefinition, CaproverClient, UpdateAppRequest};
use caprover_core::config::ServerConfig;
use caprover_core::constants::paths;

pub const PASSWORD: &str = "hunter2";
pub const TOKEN: &str = "tok-abc";

/// A successful envelope around `data`.
pub fn ok_envelope(data: Value) -> String {
    json!({ "status": 100, "description": "OK", "data": data }).to_string()
}

/// A failure envelope with the given status and description.
pub fn failed_envelope(status: i32, description: &str) -> String {
    json!({ "status": status, "description": description, "data": {} }).to_string()
}

/// Mock a successful login for `PASSWORD` returning `TOKEN`.
pub async fn mock_login(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", paths::LOGIN)
        .match_header("x-namespace", "captain")
        .match_header("x-captain-auth", Matcher::Missing)
        .match_body(Matcher::Json(json!({ "password": PASSWORD })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_envelope(json!({ "token": TOKEN })))
        .create_async()
        .await
}

/// Server config pointing at the mock server.
pub fn server_config(server: &ServerGuard) -> ServerConfig {
    ServerConfig::new(server.url(), PASSWORD)
}

/// Log in against the mock server and return the authenticated client.
pub async fn logged_in_client(server: &mut ServerGuard) -> CaproverClient {
    mock_login(server).await;
    CaproverClient::connect(&server_config(server))
        .await
        .expect("login against mock server")
}

/// A realistic app definition as the list endpoint returns it.
pub fn app_json(name: &str) -> Value {
    json!({
        "hasPersistentData": false,
        "description": format!("{name} service"),
        "instanceCount": 1,
        "captainDefinitionRelativeFilePath": "./captain-definition",
        "networks": ["captain-overlay-network"],
        "envVars": [{"key": "PORT", "value": "3000"}],
        "volumes": [
            {"containerPath": "/app/data", "volumeName": format!("{name}-data")},
            {"containerPath": "/var/lib/data", "hostPath": "/srv/db"}
        ],
        "ports": [
            {"hostPort": 9000, "containerPort": 3000},
            {"hostPort": 53, "containerPort": 53, "protocol": "udp"}
        ],
        "versions": [
            {"version": 0, "timeStamp": "2024-05-01T08:30:00.000Z", "deployedImageName": format!("img-captain-{name}:0"), "gitHash": "a1b2c3"}
        ],
        "deployedVersion": 0,
        "notExposeAsWebApp": false,
        "customDomain": [],
        "hasDefaultSubDomainSsl": false,
        "forceSsl": false,
        "websocketSupport": false,
        "containerHttpPort": 3000,
        "preDeployFunction": "",
        "serviceUpdateOverride": "",
        "appDeployTokenConfig": {"enabled": false},
        "appName": name,
        "isAppBuilding": false,
        "appPushWebhook": {
            "tokenVersion": "1",
            "pushWebhookToken": format!("hook-{name}"),
            "repoInfo": {"user": "", "password": "", "branch": "main", "sshKey": "", "repo": format!("github.com/acme/{name}")}
        }
    })
}

/// Typed form of [`app_json`].
pub fn app_definition(name: &str) -> AppDefinition {
    serde_json::from_value(app_json(name)).expect("fixture app definition")
}

/// The update body a projection of [`app_json`] produces, after `change`.
pub fn expected_update(name: &str, change: impl FnOnce(&mut UpdateAppRequest)) -> Value {
    let mut req = UpdateAppRequest::from(&app_definition(name));
    change(&mut req);
    serde_json::to_value(req).expect("serialize update request")
}

/// Mock the app list endpoint with the given app names.
pub async fn mock_app_list(server: &mut ServerGuard, names: &[&str]) -> Mock {
    let apps: Vec<Value> = names.iter().map(|n| app_json(n)).collect();
    server
        .mock("GET", paths::APP_LIST)
        .match_header("x-captain-auth", TOKEN)
        .with_status(200)
        .with_body(ok_envelope(json!({
            "appDefinitions": apps,
            "rootDomain": "apps.example.com",
            "defaultNginxConfig": "server {}"
        })))
        .create_async()
        .await
}

/// Mock the update endpoint expecting exactly `body`.
pub async fn mock_update(server: &mut ServerGuard, body: Value) -> Mock {
    server
        .mock("POST", paths::APP_UPDATE)
        .match_header("x-captain-auth", TOKEN)
        .match_header("content-type", "application/json;charset=UTF-8")
        .match_body(Matcher::Json(body))
        .with_status(200)
        .with_body(ok_envelope(json!({})))
        .create_async()
        .await
}
