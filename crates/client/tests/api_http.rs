//! HTTP behaviour of `AlertsApi` against a mocked server.

use std::time::Duration;

use assert_matches::assert_matches;
use cashcompass_client::api::{AlertsApi, AlertsBackend};
use cashcompass_client::config::ClientConfig;
use cashcompass_client::controller::AlertController;
use cashcompass_client::error::{AlertsApiError, ClientError};
use cashcompass_client::view::{AlertPanelView, PanelError};
use cashcompass_core::alert::AlertKind;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, timeout_secs: u64) -> AlertsApi {
    AlertsApi::new(&ClientConfig::new(
        server.uri(),
        Some("test-token".into()),
        timeout_secs,
    ))
    .unwrap()
}

fn alerts_body() -> serde_json::Value {
    json!([
        {
            "type": "danger",
            "message": "Action Required",
            "icon": "fas fa-calendar-times",
            "alert_hash": "h1"
        },
        {
            "type": "success",
            "message": "Excellent cash flow!",
            "icon": "fas fa-dollar-sign",
            "alert_hash": "h2"
        }
    ])
}

#[tokio::test]
async fn fetch_sends_bearer_token_and_parses_alerts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/financial_alerts_data"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alerts_body()))
        .expect(1)
        .mount(&server)
        .await;

    let alerts = api_for(&server, 5).fetch_alerts().await.unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].kind, AlertKind::Danger);
    assert_eq!(alerts[1].alert_hash, "h2");
}

#[tokio::test]
async fn non_success_status_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/financial_alerts_data"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = api_for(&server, 5).fetch_alerts().await.unwrap_err();
    assert_matches!(err, AlertsApiError::ApiError { status: 503, ref body } if body == "maintenance");
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/financial_alerts_data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(alerts_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = api_for(&server, 1).fetch_alerts().await.unwrap_err();
    assert_matches!(err, AlertsApiError::Request(e) if e.is_timeout());
}

#[tokio::test]
async fn delete_posts_hash_and_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delete_alert"))
        .and(body_json(json!({ "alert_hash": "h1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Alert dismissed permanently."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let message = api_for(&server, 5).delete_alert("h1").await.unwrap();
    assert_eq!(message, "Alert dismissed permanently.");
}

#[tokio::test]
async fn success_false_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delete_alert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Not today."
        })))
        .mount(&server)
        .await;

    let err = api_for(&server, 5).delete_alert("h1").await.unwrap_err();
    assert_matches!(err, AlertsApiError::Rejected(msg) if msg == "Not today.");
}

#[tokio::test]
async fn bad_request_keeps_server_message_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delete_alert"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Alert hash is required."
        })))
        .mount(&server)
        .await;

    let err = api_for(&server, 5).delete_alert("").await.unwrap_err();
    assert_matches!(
        err,
        AlertsApiError::ApiError { status: 400, ref body } if body.contains("Alert hash is required.")
    );
}

#[tokio::test]
async fn controller_shows_load_error_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/financial_alerts_data"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let controller = AlertController::new(api_for(&server, 5));
    assert_matches!(controller.refresh().await, Err(ClientError::Fetch(_)));
    assert_eq!(controller.view(), AlertPanelView::Error(PanelError::LoadFailed));
    assert!(!controller.badge().visible);
}

#[tokio::test]
async fn controller_keeps_list_when_reset_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/financial_alerts_data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alerts_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/reset_alerts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "message": "Failed to reset alerts."
        })))
        .mount(&server)
        .await;

    let controller = AlertController::new(api_for(&server, 5));
    controller.refresh().await.unwrap();

    assert_matches!(controller.reset_all().await, Err(ClientError::Reset(_)));
    assert_eq!(controller.view(), AlertPanelView::Error(PanelError::ResetFailed));
    assert_eq!(controller.badge().count, 2);
}
