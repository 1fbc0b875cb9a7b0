use std::path::Path;

use anyhow::anyhow;
use pretty_assertions::assert_eq;
use reqwest::{header::CONTENT_TYPE, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tyre_api_rest::{RestServer, RestServerConfig};
use tyre_core_contact_contracts::{
    ContactSubmitError, ContactSubmitRequest, ContactSubmitResult, MockContactFeatureService,
};

async fn spawn(contact: MockContactFeatureService, static_dir: &Path) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = RestServerConfig {
        host: addr.ip(),
        port: addr.port(),
        static_dir: static_dir.into(),
        body_limit: 200 * 1024,
    };
    tokio::spawn(RestServer::new(config, contact).serve_with(listener));
    format!("http://{addr}")
}

fn jo() -> ContactSubmitRequest {
    ContactSubmitRequest {
        name: "Jo".into(),
        mobile: "12345678".into(),
        email: "jo@example.com".into(),
        message: "Hi there".into(),
    }
}

async fn post_json(base: &str, body: &Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/contact"))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn ok() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        jo(),
        Ok(ContactSubmitResult {
            id: 1.into(),
            saved: true,
            email_sent: false,
        }),
    );
    let static_dir = tempfile::tempdir().unwrap();
    let base = spawn(contact, static_dir.path()).await;

    // Act
    let response = reqwest::Client::new()
        .post(format!("{base}/api/contact"))
        .json(&json!({
            "name": "Jo",
            "mobile": "12345678",
            "email": "jo@example.com",
            "message": "Hi there",
        }))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"ok": true, "id": 1, "saved": true, "emailSent": false})
    );
}

#[tokio::test]
async fn numeric_fields_are_coerced() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        jo(),
        Ok(ContactSubmitResult {
            id: 9.into(),
            saved: true,
            email_sent: true,
        }),
    );
    let static_dir = tempfile::tempdir().unwrap();
    let base = spawn(contact, static_dir.path()).await;

    // Act
    let (status, body) = post_json(
        &base,
        &json!({
            "name": "Jo",
            "mobile": 12345678,
            "email": "jo@example.com",
            "message": "Hi there",
        }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"ok": true, "id": 9, "saved": true, "emailSent": true})
    );
}

#[tokio::test]
async fn validation_errors() {
    let static_dir = tempfile::tempdir().unwrap();

    for (err, expected) in [
        (ContactSubmitError::InvalidName, "Name is required."),
        (ContactSubmitError::InvalidMobile, "Mobile number is required."),
        (ContactSubmitError::InvalidEmail, "Valid email is required."),
        (ContactSubmitError::InvalidMessage, "Message is required."),
    ] {
        // Arrange
        let contact =
            MockContactFeatureService::new().with_submit(ContactSubmitRequest::default(), Err(err));
        let base = spawn(contact, static_dir.path()).await;

        // Act
        let (status, body) = post_json(&base, &json!({})).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": expected}));
    }
}

#[tokio::test]
async fn storage_failure() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        jo(),
        Err(ContactSubmitError::Other(anyhow!("database is locked"))),
    );
    let static_dir = tempfile::tempdir().unwrap();
    let base = spawn(contact, static_dir.path()).await;

    // Act
    let (status, body) = post_json(
        &base,
        &json!({
            "name": "Jo",
            "mobile": "12345678",
            "email": "jo@example.com",
            "message": "Hi there",
        }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Server error."}));
}

#[tokio::test]
async fn malformed_json() {
    // Arrange
    let static_dir = tempfile::tempdir().unwrap();
    let base = spawn(MockContactFeatureService::new(), static_dir.path()).await;

    // Act
    let response = reqwest::Client::new()
        .post(format!("{base}/api/contact"))
        .header(CONTENT_TYPE, "application/json")
        .body(r#"{"name": "Jo", "#)
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"error": "Server error."})
    );
}

#[tokio::test]
async fn body_without_json_content_type_has_no_fields() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        ContactSubmitRequest::default(),
        Err(ContactSubmitError::InvalidName),
    );
    let static_dir = tempfile::tempdir().unwrap();
    let base = spawn(contact, static_dir.path()).await;

    // Act
    let response = reqwest::Client::new()
        .post(format!("{base}/api/contact"))
        .header(CONTENT_TYPE, "text/plain")
        .body("name=Jo")
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"error": "Name is required."})
    );
}

#[tokio::test]
async fn cors() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        ContactSubmitRequest::default(),
        Err(ContactSubmitError::InvalidName),
    );
    let static_dir = tempfile::tempdir().unwrap();
    let base = spawn(contact, static_dir.path()).await;

    // Act
    let response = reqwest::Client::new()
        .post(format!("{base}/api/contact"))
        .header("Origin", "https://maps.example.org")
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn static_files() {
    // Arrange
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<h1>Tyre</h1>").unwrap();
    std::fs::write(static_dir.path().join("app.js"), "console.log('tyre')").unwrap();
    let base = spawn(MockContactFeatureService::new(), static_dir.path()).await;

    // Act
    let index = reqwest::get(format!("{base}/")).await.unwrap();
    let script = reqwest::get(format!("{base}/app.js")).await.unwrap();
    let missing = reqwest::get(format!("{base}/missing.html")).await.unwrap();

    // Assert
    assert_eq!(index.status(), StatusCode::OK);
    assert_eq!(index.text().await.unwrap(), "<h1>Tyre</h1>");
    assert_eq!(script.status(), StatusCode::OK);
    assert_eq!(script.text().await.unwrap(), "console.log('tyre')");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
