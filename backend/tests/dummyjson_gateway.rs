//! The reqwest users gateway against a mock upstream.

use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use user_admin::domain::UserId;
use user_admin::domain::ports::UsersGateway;
use user_admin::domain::transform::UserPayload;
use user_admin::outbound::dummyjson::{DummyJsonUsersGateway, LIST_SELECT, UsersEndpoints};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer, timeout: Duration) -> DummyJsonUsersGateway {
    let endpoints = UsersEndpoints::parse(&server.uri()).expect("mock server base");
    DummyJsonUsersGateway::new(endpoints, timeout).expect("client")
}

#[tokio::test]
async fn list_sends_paging_and_select() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("limit", "10"))
        .and(query_param("skip", "20"))
        .and(query_param("select", LIST_SELECT))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 21, "firstName": "Ann", "lastName": "Lee"}],
            "total": 208,
            "skip": 20,
            "limit": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = gateway(&server, Duration::from_secs(2))
        .list(10, 20)
        .await
        .expect("list");

    assert_eq!(page.total, 208);
    assert_eq!(page.users.len(), 1);
    assert_eq!(
        page.users.first().map(|user| user.id),
        Some(UserId::new(21))
    );
}

#[rstest]
#[case(404, "Not Found", true)]
#[case(500, "Internal Server Error", false)]
#[tokio::test]
async fn error_statuses_are_reported(
    #[case] status: u16,
    #[case] text: &str,
    #[case] not_found: bool,
) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_secs(2))
        .get(UserId::new(7))
        .await
        .expect_err("status error");

    assert_eq!(err.to_string(), format!("API request failed: {status} {text}"));
    assert_eq!(err.is_not_found(), not_found);
}

#[tokio::test]
async fn record_without_id_is_a_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"firstName": "Ann"})))
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_secs(2))
        .get(UserId::new(7))
        .await
        .expect_err("shape error");

    assert!(err.is_invalid_shape(), "{err}");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_puts_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/3"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"firstName": "Ann"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;
    let payload = UserPayload {
        first_name: Some("Ann".into()),
        ..UserPayload::default()
    };

    gateway(&server, Duration::from_secs(2))
        .update(UserId::new(3), &payload)
        .await
        .expect("update");
}

#[tokio::test]
async fn create_returns_assigned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/add"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 209})))
        .mount(&server)
        .await;

    let id = gateway(&server, Duration::from_secs(2))
        .create(&UserPayload::default())
        .await
        .expect("create");

    assert_eq!(id, Some(UserId::new(209)));
}

#[tokio::test]
async fn delete_succeeds_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "isDeleted": true})))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server, Duration::from_secs(2))
        .delete(UserId::new(4))
        .await
        .expect("delete");
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let err = gateway(&server, Duration::from_millis(50))
        .get(UserId::new(1))
        .await
        .expect_err("timeout");

    assert!(err.is_transport(), "{err}");
    assert!(err.to_string().contains("timed out"), "{err}");
}
