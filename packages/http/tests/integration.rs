use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use datakit_http::ApiClient;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct User {
    id: u64,
    name: String,
    email: String,
}

fn timeout() -> Duration {
    Duration::from_secs(10)
}

#[tokio::test]
async fn get_decodes_the_json_body() {
    let server = MockServer::start().await;

    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/users/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&user))
        .mount(&server)
        .await;

    let uri = server.uri();

    let body = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(&uri, timeout()).unwrap();
        client.get("users/123", &[]).unwrap()
    })
    .await
    .unwrap();

    assert_eq!(body["name"], "Alice");
    assert_eq!(body["id"], 123);
}

#[tokio::test]
async fn get_passes_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": ["result1", "result2"]
        })))
        .mount(&server)
        .await;

    let uri = server.uri();

    let body = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(&uri, timeout()).unwrap();
        client
            .get("search", &[("q", "rust"), ("limit", "10")])
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(body["results"][0], "result1");
}

#[tokio::test]
async fn get_absorbs_a_404_into_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Not found"
        })))
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(&uri, timeout()).unwrap();
        client.get("users/999", &[])
    })
    .await
    .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn get_absorbs_a_server_error_into_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/error"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal Server Error"
        })))
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(&uri, timeout()).unwrap();
        client.get("api/error", &[])
    })
    .await
    .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn get_absorbs_an_undecodable_body_into_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/not-json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(&uri, timeout()).unwrap();
        client.get("not-json", &[])
    })
    .await
    .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn post_sends_the_json_body() {
    let server = MockServer::start().await;

    let new_user = User {
        id: 0,
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
    };

    let created_user = User {
        id: 456,
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(&new_user))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created_user))
        .mount(&server)
        .await;

    let uri = server.uri();
    let user_to_send = new_user.clone();

    let body = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(&uri, timeout()).unwrap();
        client.post("users", &user_to_send).unwrap()
    })
    .await
    .unwrap();

    assert_eq!(body["id"], 456);
}

#[tokio::test]
async fn post_absorbs_a_client_error_into_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Bad request"
        })))
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new(&uri, timeout()).unwrap();
        client.post("users", &json!({"name": ""}))
    })
    .await
    .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn transport_failure_is_absorbed_into_none() {
    // Nothing is listening on this port.
    let result = tokio::task::spawn_blocking(move || {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        client.get("anything", &[])
    })
    .await
    .unwrap();

    assert!(result.is_none());
}
