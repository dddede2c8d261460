//! Integration tests for read-modify-write setting changes.
//!
//! Every change must submit the full current projection with exactly one
//! field altered.

mod common;

use common::*;
use mockito::Server;
use serde_json::json;

use caprover_core::constants::paths;
use caprover_core::error::CaproverError;

#[tokio::test]
async fn websocket_support_toggles() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    mock_app_list(&mut server, &["web"]).await;

    let enable = mock_update(&mut server, expected_update("web", |r| r.websocket_support = true)).await;
    client.enable_websocket_support("web").await.unwrap();
    enable.assert_async().await;

    let disable = mock_update(&mut server, expected_update("web", |r| r.websocket_support = false)).await;
    client.disable_websocket_support("web").await.unwrap();
    disable.assert_async().await;
}

#[tokio::test]
async fn force_https_toggles() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    mock_app_list(&mut server, &["web"]).await;

    let enable = mock_update(&mut server, expected_update("web", |r| r.force_ssl = true)).await;
    client.enable_force_https("web").await.unwrap();
    enable.assert_async().await;

    let disable = mock_update(&mut server, expected_update("web", |r| r.force_ssl = false)).await;
    client.disable_force_https("web").await.unwrap();
    disable.assert_async().await;
}

#[tokio::test]
async fn instance_count_pins_to_zero_and_one() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    mock_app_list(&mut server, &["web"]).await;

    let zero = mock_update(&mut server, expected_update("web", |r| r.instance_count = 0)).await;
    client.turn_instance_count_zero("web").await.unwrap();
    zero.assert_async().await;

    let one = mock_update(&mut server, expected_update("web", |r| r.instance_count = 1)).await;
    client.turn_instance_count_one("web").await.unwrap();
    one.assert_async().await;
}

#[tokio::test]
async fn container_http_port_is_read_modify_write() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    mock_app_list(&mut server, &["web"]).await;

    let update = mock_update(&mut server, expected_update("web", |r| r.container_http_port = 8080)).await;
    client.update_container_http_port("web", 8080).await.unwrap();
    update.assert_async().await;
}

#[tokio::test]
async fn resource_constraints_embed_orchestrator_override() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    mock_app_list(&mut server, &["web"]).await;

    let blob = r#"{"TaskTemplate":{"Resources":{"Limits":{"MemoryBytes":536870912,"NanoCPUs":1500000000}}}}"#;
    let update = mock_update(
        &mut server,
        expected_update("web", |r| r.service_update_override = blob.to_string()),
    )
    .await;

    client.set_resource_constraints("web", 512, 1.5).await.unwrap();
    update.assert_async().await;
}

#[tokio::test]
async fn restart_resubmits_unchanged_projection() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    mock_app_list(&mut server, &["web"]).await;

    let update = mock_update(&mut server, expected_update("web", |_| {})).await;
    client.restart_app("web").await.unwrap();
    update.assert_async().await;
}

#[tokio::test]
async fn missing_app_sends_no_update() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    mock_app_list(&mut server, &["web"]).await;
    let update = server
        .mock("POST", paths::APP_UPDATE)
        .expect(0)
        .create_async()
        .await;

    let err = client.enable_force_https("api").await.unwrap_err();
    assert!(matches!(err, CaproverError::NotFound(ref n) if n == "api"));
    update.assert_async().await;
}

#[tokio::test]
async fn rejected_update_surfaces_remote_error() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    mock_app_list(&mut server, &["web"]).await;
    server
        .mock("POST", paths::APP_UPDATE)
        .with_status(200)
        .with_body(json!({ "status": 1000, "description": "Port 80 is reserved" }).to_string())
        .create_async()
        .await;

    let err = client.update_container_http_port("web", 80).await.unwrap_err();
    assert_eq!(err.to_string(), "Port 80 is reserved");
}

#[tokio::test]
async fn out_of_range_resources_send_nothing() {
    let mut server = Server::new_async().await;
    let client = logged_in_client(&mut server).await;
    let list = server
        .mock("GET", paths::APP_LIST)
        .expect(0)
        .create_async()
        .await;
    let update = server
        .mock("POST", paths::APP_UPDATE)
        .expect(0)
        .create_async()
        .await;

    let err = client.set_resource_constraints("web", -64, 1.0).await.unwrap_err();
    assert!(matches!(err, CaproverError::InvalidInput(_)), "got {err:?}");
    let err = client.set_resource_constraints("web", i64::MAX, 1.0).await.unwrap_err();
    assert!(matches!(err, CaproverError::InvalidInput(_)), "got {err:?}");

    list.assert_async().await;
    update.assert_async().await;
}
