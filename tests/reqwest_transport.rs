//! Presence client over the reqwest transport against a local mock server.

use std::time::Duration;

use serde_json::json;
use teams_presence::models::{Activity, Availability, Expiry, PresenceDuration, WorkLocation};
use teams_presence::{ClientConfig, PresenceClient, PresenceError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "integration-token";

fn client_for(server: &MockServer) -> PresenceClient {
    let config = ClientConfig::new(TOKEN)
        .with_base_url(format!("{}/v1/me", server.uri()))
        .with_user_agent("teams-presence-tests");
    PresenceClient::new(config).unwrap()
}

#[tokio::test]
async fn test_forced_availability_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/me/forceavailability"))
        .and(header("Authorization", "Bearer integration-token"))
        .and(header("Content-Type", "application/json"))
        .and(header("User-Agent", "teams-presence-tests"))
        .and(body_json(json!({
            "availability": "Offline",
            "activity": "OffWork",
            "desiredExpirationTime": "9999-12-30T23:00:00.000Z",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .set_forced_availability(Availability::Offline, &Expiry::never())
        .await
        .unwrap();
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn test_work_location_and_note() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/me/workLocation"))
        .and(body_json(json!({
            "location": 2,
            "expirationTime": "9999-12-30T23:00:00.000Z",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/me/publishnote"))
        .and(body_json(json!({
            "expiry": "9999-12-30T23:00:00.000Z",
            "message": "<p>Back in 5</p>",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .set_work_location(WorkLocation::Remote, &Expiry::never())
        .await
        .unwrap();
    client
        .set_publish_note("Back in 5", false, &Expiry::never())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_status_returns_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/presence"))
        .and(header("Authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "availability": "Busy",
            "activity": "InACall",
        })))
        .mount(&server)
        .await;

    let status = client_for(&server).get_status().await.unwrap();
    assert_eq!(status["availability"], "Busy");
    assert_eq!(status["activity"], "InACall");
}

#[tokio::test]
async fn test_upstream_error_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/presence"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such user"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_status().await.unwrap_err();
    match err {
        PresenceError::Upstream { status, body, .. } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such user");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_endpoint_presence_status_codes() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/me/endpoints/"))
        .and(body_json(json!({
            "id": "device-1",
            "activityReporting": "Transport",
            "deviceType": "Web",
            "availability": "Busy",
            "activity": "InAConferenceCall",
            "expirationDuration": "PT30M",
        })))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/me/endpoints/"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.set_session_id("device-1");
    let thirty_minutes = PresenceDuration::from_minutes(30).unwrap();
    let resp = client
        .set_presence(Availability::Busy, Activity::InAConferenceCall, thirty_minutes)
        .await
        .unwrap();
    assert_eq!(resp.status, 201);

    // Falls through to the catch-all mock, which answers 202.
    let err = client
        .set_presence(Availability::Away, Activity::Away, thirty_minutes)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(202));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/presence"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = ClientConfig::new(TOKEN)
        .with_base_url(format!("{}/v1/me", server.uri()))
        .with_timeout(Duration::from_millis(100));
    let client = PresenceClient::new(config).unwrap();

    let err = client.get_status().await.unwrap_err();
    assert!(matches!(err, PresenceError::Timeout { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ClientConfig::new(TOKEN).with_base_url(format!("http://127.0.0.1:{}/v1/me", port));
    let client = PresenceClient::new(config).unwrap();

    let err = client.get_status().await.unwrap_err();
    assert!(matches!(err, PresenceError::Transport { .. }), "{:?}", err);
}
