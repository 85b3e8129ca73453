/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for eventdesk-adapter tests

use eventdesk_adapter::{ClientConfig, EventdeskClient, Task, UserRef};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> EventdeskClient {
    EventdeskClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
}

/// Successful envelope around `data`
#[allow(dead_code)]
pub fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "code": 0, "data": data })
}

/// User payload as the auth endpoints return it
#[allow(dead_code)]
pub fn user_json(id: i64, username: &str) -> serde_json::Value {
    serde_json::json!({ "user": { "id": id, "username": username } })
}

/// Task snapshot with a raw status code, assigned by user 1 to user 2
#[allow(dead_code)]
pub fn task_with_status(id: i64, status: Option<i64>) -> Task {
    Task {
        id,
        name: format!("task-{id}"),
        description: None,
        status,
        start_time: None,
        end_time: None,
        assigned_user: Some(UserRef {
            id: 2,
            username: "assignee".to_string(),
        }),
        assigner_user: Some(UserRef {
            id: 1,
            username: "assigner".to_string(),
        }),
        event_id: Some(1),
    }
}
