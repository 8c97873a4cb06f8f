//! HTTP API tests
//!
//! Exercises the router end to end with in-memory stores.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use drive_service::{
    adapters::{
        middleware::ACCOUNT_ID_HEADER,
        repositories::{MemoryFileRepository, MemoryUserRepository},
        router::create_router,
        state::AppState,
        view_invalidation::TracingViewInvalidator,
    },
    services::MemoryObjectStore,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "drive-service-test-boundary";

fn create_test_router() -> Router {
    let app_state = AppState::new(
        Arc::new(MemoryObjectStore::new()),
        Arc::new(MemoryFileRepository::new()),
        Arc::new(MemoryUserRepository::new()),
        Arc::new(TracingViewInvalidator),
        1_000,
        "memory",
    );
    create_router(app_state, 1024 * 1024, &[])
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, account_id: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(account_id) = account_id {
        builder = builder.header(ACCOUNT_ID_HEADER, account_id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, account_id: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(ACCOUNT_ID_HEADER, account_id)
        .body(Body::empty())
        .unwrap()
}

fn upload_request(account_id: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"path\"\r\n\r\n/documents");
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/files")
        .header(ACCOUNT_ID_HEADER, account_id)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn register(router: &Router, name: &str) -> String {
    let account_id = format!("account-{}", name);
    let (status, _) = send(
        router,
        json_request(
            "POST",
            "/api/v1/users",
            None,
            json!({
                "fullName": name,
                "email": format!("{}@example.com", name),
                "accountId": account_id,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    account_id
}

#[tokio::test]
async fn registration_is_idempotent_on_email() {
    let router = create_test_router();
    register(&router, "alice").await;

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/v1/users",
            None,
            json!({
                "fullName": "Alice Again",
                "email": "ALICE@example.com",
                "accountId": "account-other",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accountId"], "account-alice");
    assert_eq!(body["isAdmin"], false);
}

#[tokio::test]
async fn registration_requires_an_email() {
    let router = create_test_router();
    let (status, _) = send(
        &router,
        json_request(
            "POST",
            "/api/v1/users",
            None,
            json!({ "fullName": "Nobody", "email": "", "accountId": "x" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn file_routes_require_a_resolved_user() {
    let router = create_test_router();

    let request = Request::builder()
        .uri("/api/v1/files")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&router, get_request("/api/v1/files", "account-ghost")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn upload_list_rename_and_delete() {
    let router = create_test_router();
    let alice = register(&router, "alice").await;

    let (status, uploaded) = send(&router, upload_request(&alice, "report.pdf", b"0123456789")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(uploaded["type"], "document");
    assert_eq!(uploaded["extension"], "pdf");
    assert_eq!(uploaded["size"], 10);
    assert_eq!(uploaded["users"], json!([]));
    let file_id = uploaded["id"].as_str().unwrap().to_string();
    let object_ref = uploaded["objectRef"].as_str().unwrap();
    assert_eq!(
        uploaded["url"],
        format!("memory://objects/{}", object_ref)
    );

    let (status, listing) = send(
        &router,
        get_request("/api/v1/files?type=documents&sort=name-asc", &alice),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["totalSize"], 10);

    let (_, listing) = send(&router, get_request("/api/v1/files?type=images", &alice)).await;
    assert_eq!(listing["total"], 0);

    let (status, renamed) = send(
        &router,
        json_request(
            "PATCH",
            &format!("/api/v1/files/{}/name", file_id),
            Some(&alice),
            json!({ "name": "final", "extension": "pdf", "path": "/documents" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "final.pdf");

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/files/{}?path=/documents", file_id))
        .header(ACCOUNT_ID_HEADER, alice.as_str())
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listing) = send(&router, get_request("/api/v1/files", &alice)).await;
    assert_eq!(listing["total"], 0);
}

#[tokio::test]
async fn sharing_grants_listing_and_usage() {
    let router = create_test_router();
    let alice = register(&router, "alice").await;
    let bob = register(&router, "bob").await;

    let (_, uploaded) = send(&router, upload_request(&alice, "song.mp3", b"abcdef")).await;
    let file_id = uploaded["id"].as_str().unwrap().to_string();

    let (_, listing) = send(&router, get_request("/api/v1/files", &bob)).await;
    assert_eq!(listing["total"], 0);

    let (status, shared) = send(
        &router,
        json_request(
            "PUT",
            &format!("/api/v1/files/{}/users", file_id),
            Some(&alice),
            json!({ "emails": ["bob@example.com"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shared["users"], json!(["bob@example.com"]));

    let (_, listing) = send(&router, get_request("/api/v1/files", &bob)).await;
    assert_eq!(listing["total"], 1);

    let (status, usage) = send(&router, get_request("/api/v1/storage/usage", &bob)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usage["used"], 6);
    assert_eq!(usage["audio"]["size"], 6);
    assert_eq!(usage["image"]["latestDate"], Value::Null);
    assert_eq!(usage["all"], 1_000);
    assert_eq!(usage["overCapacity"], false);
}

#[tokio::test]
async fn sharing_matches_emails_regardless_of_case() {
    let router = create_test_router();
    let alice = register(&router, "alice").await;

    let (status, bob) = send(
        &router,
        json_request(
            "POST",
            "/api/v1/users",
            None,
            json!({
                "fullName": "Bob",
                "email": "Bob@Example.com",
                "accountId": "account-bob",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bob["email"], "bob@example.com");

    let (_, uploaded) = send(&router, upload_request(&alice, "report.pdf", b"0123")).await;
    let file_id = uploaded["id"].as_str().unwrap().to_string();

    let (status, shared) = send(
        &router,
        json_request(
            "PUT",
            &format!("/api/v1/files/{}/users", file_id),
            Some(&alice),
            json!({ "emails": ["Bob@Example.com"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shared["users"], json!(["bob@example.com"]));

    let (_, listing) = send(&router, get_request("/api/v1/files", "account-bob")).await;
    assert_eq!(listing["total"], 1);
}

#[tokio::test]
async fn deleting_an_unknown_file_is_not_found() {
    let router = create_test_router();
    let alice = register(&router, "alice").await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/files/does-not-exist")
        .header(ACCOUNT_ID_HEADER, alice.as_str())
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_providers() {
    let router = create_test_router();
    let request = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["objectStore"], "memory");
    assert_eq!(body["documentStore"], "memory");
    assert_eq!(body["capacityBytes"], 1_000);
}
