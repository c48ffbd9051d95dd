use std::{io::Write, sync::Arc, time::Duration};

use axum::http::HeaderValue;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tablegate::{
    auth::shared::SharedPassword,
    db::{seed, Database},
    model::service,
    store::{config::JsonFileConfig, memory::InMemorySessionStore, sweeper},
    utils::clock::ManualClock,
    ConfigStore,
};
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;

const HOUR: i64 = 3_600_000;

struct TestServer {
    url: String,
    clock: ManualClock,
    data: Arc<service::Data>,
    config_file: NamedTempFile,
}

async fn start_server() -> TestServer {
    let mut config_file = NamedTempFile::new().expect("Failed to create config");
    write!(
        config_file,
        r#"{{"auth":{{"currentPassword":"admin","passwordChanged":false,"sessionDuration":{}}}}}"#,
        HOUR
    )
    .expect("Failed to write config");
    let config: Arc<dyn ConfigStore + Send + Sync> =
        Arc::new(JsonFileConfig::load(config_file.path()).expect("Failed to load config"));
    let db = Database::in_memory().await.expect("Failed to open db");
    seed::sample_data(&db).await.expect("Failed to seed db");
    let clock = ManualClock::new(0);
    let data = Arc::new(service::Data {
        store: Box::new(InMemorySessionStore::new()),
        auth_service: Box::new(SharedPassword::new(config.clone())),
        config,
        clock: Box::new(clock.clone()),
        db,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    let app = tablegate::service(
        data.clone(),
        HeaderValue::from_static("http://localhost:8888"),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    TestServer {
        url: format!("http://{}", addr),
        clock,
        data,
        config_file,
    }
}

impl TestServer {
    async fn login(&self, password: &str) -> Response {
        Client::new()
            .post(format!("{}/auth/login", self.url))
            .json(&json!({ "password": password }))
            .send()
            .await
            .expect("Failed to send request")
    }

    async fn session_id(&self) -> String {
        let response = self.login("admin").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["sessionId"].as_str().unwrap().to_string()
    }

    async fn get(&self, path: &str, session_id: &str) -> Response {
        Client::new()
            .get(format!("{}{}", self.url, path))
            .header("X-Session-Id", session_id)
            .send()
            .await
            .expect("Failed to send request")
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        session_id: &str,
        body: Option<Value>,
    ) -> Response {
        let mut request = Client::new()
            .request(method, format!("{}{}", self.url, path))
            .header("X-Session-Id", session_id);
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.expect("Failed to send request")
    }
}

fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get("set-cookie")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_live() {
    let server = start_server().await;
    let response = Client::new()
        .get(format!("{}/live", server.url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_successful_login() {
    let server = start_server().await;
    let response = server.login("admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    let session_id = body["sessionId"].as_str().unwrap();
    assert_eq!(64, session_id.len());
    assert_eq!(session_id, body["session"]["id"]);
    assert_eq!("1970-01-01T00:00:00Z", body["session"]["createdAt"]);
    assert_eq!("1970-01-01T01:00:00Z", body["session"]["expiresAt"]);
    assert_eq!(true, body["requiresPasswordChange"]);
    assert!(cookie.starts_with(&format!("session-id={}", session_id)), "{}", cookie);
    assert!(cookie.contains("HttpOnly"), "{}", cookie);
}

#[tokio::test]
async fn test_failed_login() {
    let server = start_server().await;
    let response = server.login("admin_wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid password", body["error"]);

    let response = server.login("").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!("Password required", body["error"]);
    assert!(server.data.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_without_body() {
    let server = start_server().await;
    let response = Client::new()
        .post(format!("{}/auth/login", server.url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!("Password required", body["error"]);
}

#[tokio::test]
async fn test_login_bad_body() {
    let server = start_server().await;
    let requests = vec![
        ("application/json", r#"{"password":123}"#),
        ("application/json", "{"),
        ("text/plain", "admin"),
    ];
    for (content_type, payload) in requests {
        let response = Client::new()
            .post(format!("{}/auth/login", server.url))
            .header("content-type", content_type)
            .body(payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string(), "{}", payload);
    }
    assert!(server.data.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_no_session() {
    let server = start_server().await;
    let response = Client::new()
        .get(format!("{}/tables", server.url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!("Session ID required", body["error"]);
    assert_eq!(true, body["requiresAuth"]);
}

#[tokio::test]
async fn test_unknown_session() {
    let server = start_server().await;
    let response = server.get("/tables", "olia").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).starts_with("session-id=;"));
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid or expired session", body["error"]);
}

#[tokio::test]
async fn test_session_expiry() {
    let server = start_server().await;
    let session_id = server.session_id().await;

    server.clock.set(HOUR - 1);
    let response = server.get("/auth/session", &session_id).await;
    assert_eq!(response.status(), StatusCode::OK);

    server.clock.set(HOUR + 1);
    let response = server.get("/auth/session", &session_id).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).contains("Max-Age=0"));
    let body: Value = response.json().await.unwrap();
    assert_eq!("Invalid or expired session", body["error"]);
    assert!(server.data.store.get(&session_id).await.is_err());
}

#[tokio::test]
async fn test_activity_does_not_extend_session() {
    let server = start_server().await;
    let session_id = server.session_id().await;

    server.clock.set(1000);
    let response = server.get("/auth/session", &session_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!("1970-01-01T00:00:01Z", body["session"]["lastActivity"]);
    assert_eq!("1970-01-01T01:00:00Z", body["session"]["expiresAt"]);
    assert_eq!(HOUR - 1000, body["session"]["timeRemaining"]);
    assert_eq!(1000, body["session"]["timeElapsed"]);
    assert_eq!(HOUR, body["session"]["totalDuration"]);
    assert_eq!(1, body["activeSessions"]);
    assert_eq!(true, body["requiresPasswordChange"]);

    let stored = server.data.store.get(&session_id).await.unwrap();
    assert_eq!(1000, stored.last_activity);
    assert_eq!(HOUR, stored.expires_at);
}

#[tokio::test]
async fn test_cookie_session() {
    let server = start_server().await;
    let session_id = server.session_id().await;
    let response = Client::new()
        .get(format!("{}/tables", server.url))
        .header("Cookie", format!("session-id={}", session_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout() {
    let server = start_server().await;
    let session_id = server.session_id().await;
    let response = server
        .send(reqwest::Method::POST, "/auth/logout", &session_id, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).starts_with("session-id=;"));
    let body: Value = response.json().await.unwrap();
    assert_eq!("Logged out successfully", body["message"]);

    let response = server.get("/tables", &session_id).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check() {
    let server = start_server().await;
    let response = Client::new()
        .get(format!("{}/auth/check", server.url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!("No session", body["error"]);
    assert_eq!(true, body["requiresAuth"]);

    let session_id = server.session_id().await;
    server.clock.set(HOUR / 2);
    let response = server.get("/auth/check", &session_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(session_id, body["sessionId"]);
    assert_eq!(50.0, body["session"]["percentRemaining"]);

    server.clock.set(HOUR);
    let response = server.get("/auth/check", &session_id).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).starts_with("session-id=;"));
    let body: Value = response.json().await.unwrap();
    assert_eq!("Session expired", body["error"]);
}

#[tokio::test]
async fn test_sessions_list() {
    let server = start_server().await;
    let session_id = server.session_id().await;
    server.clock.advance(10);
    server.session_id().await;

    let response = server.get("/auth/sessions", &session_id).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(2, body["total"]);
    let first = body["sessions"][0]["id"].as_str().unwrap();
    assert_eq!(format!("{}...", &session_id[..8]), first);
    assert_eq!(true, body["sessions"][0]["isActive"]);
}

#[tokio::test]
async fn test_change_password() {
    let server = start_server().await;
    let session_id = server.session_id().await;
    let change = |current: &str, new: &str| {
        json!({ "currentPassword": current, "newPassword": new })
    };

    let response = server
        .send(
            reqwest::Method::POST,
            "/auth/change-password",
            &session_id,
            Some(change("admin", "12345")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .send(
            reqwest::Method::POST,
            "/auth/change-password",
            &session_id,
            Some(change("wrong", "123456")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = server
        .send(
            reqwest::Method::POST,
            "/auth/change-password",
            &session_id,
            Some(json!({ "currentPassword": "admin" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .send(
            reqwest::Method::POST,
            "/auth/change-password",
            &session_id,
            Some(change("admin", "123456")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!("Password changed successfully", body["message"]);

    assert_eq!(server.login("admin").await.status(), StatusCode::UNAUTHORIZED);
    let response = server.login("123456").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(false, body["requiresPasswordChange"]);

    let content = std::fs::read_to_string(server.config_file.path()).unwrap();
    let saved: Value = serde_json::from_str(&content).unwrap();
    assert_eq!("123456", saved["auth"]["currentPassword"]);
    assert_eq!(true, saved["auth"]["passwordChanged"]);
}

#[tokio::test]
async fn test_tables_crud() {
    let server = start_server().await;
    let session_id = server.session_id().await;

    let tables: Value = server.get("/tables", &session_id).await.json().await.unwrap();
    for name in ["users", "products", "orders"] {
        assert!(tables.as_array().unwrap().contains(&json!(name)), "{}", name);
    }

    let users: Value = server.get("/table/users", &session_id).await.json().await.unwrap();
    assert_eq!(4, users.as_array().unwrap().len());

    let response = server
        .send(
            reqwest::Method::POST,
            "/table/users",
            &session_id,
            Some(json!({"name": "Eva", "email": "eva@example.com", "age": 41})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(5, body["id"]);

    let response = server
        .send(
            reqwest::Method::PUT,
            "/table/users/5",
            &session_id,
            Some(json!({"age": 42})),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(1, body["changes"]);
    let users: Value = server.get("/table/users", &session_id).await.json().await.unwrap();
    assert_eq!(42, users[4]["age"]);

    let response = server
        .send(reqwest::Method::DELETE, "/table/users/5", &session_id, None)
        .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(1, body["deleted"]);

    let response = server
        .send(reqwest::Method::DELETE, "/table/orders/clear", &session_id, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(4, body["cleared"]);
    assert_eq!("Table orders was cleared", body["message"]);
    let orders: Value = server.get("/table/orders", &session_id).await.json().await.unwrap();
    assert_eq!(json!([]), orders);
}

#[tokio::test]
async fn test_table_errors() {
    let server = start_server().await;
    let session_id = server.session_id().await;

    let response = server.get("/table/nope", &session_id).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("no such table"));

    let response = server
        .send(reqwest::Method::PUT, "/table/users/1", &session_id, Some(json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .send(reqwest::Method::POST, "/table/users", &session_id, Some(json!([1, 2])))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .send(
            reqwest::Method::POST,
            "/table/users",
            &session_id,
            Some(json!({"name": "No Email"})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("NOT NULL"));
}

#[tokio::test]
async fn test_database_info() {
    let server = start_server().await;
    let session_id = server.session_id().await;
    let body: Value = server.get("/database/info", &session_id).await.json().await.unwrap();
    assert_eq!(":memory:", body["path"]);
    assert!(body["fullPath"].as_str().is_some());
}

#[tokio::test]
async fn test_sweeper_removes_expired() {
    let server = start_server().await;
    let session_id = server.session_id().await;
    server.clock.set(HOUR + 1);

    let cancel = CancellationToken::new();
    let handle = sweeper::spawn(server.data.clone(), Duration::from_millis(10), cancel.clone());
    let mut removed = false;
    for _ in 0..50 {
        if server.data.store.get(&session_id).await.is_err() {
            removed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cancel.cancel();
    handle.await.unwrap();
    assert!(removed);
    assert_eq!(HOUR + 1, server.data.clock.now());
}
