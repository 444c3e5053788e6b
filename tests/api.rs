//! HTTP-level integration tests
//!
//! Drives the full router (middleware included) over an in-memory database,
//! one request at a time via `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use guestlist_server::api;
use guestlist_server::core::{Config, ServerState};
use guestlist_server::db::MIGRATOR;

/// App over a fresh in-memory database.
///
/// One connection only: every connection to `sqlite::memory:` is its own
/// private database.
async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    let config = Config::with_overrides(":memory:", 0);
    api::build_app(ServerState::new(config, pool))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_table(app: &Router, capacity: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/tables",
        Some(json!({ "capacity": capacity })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_database_ok() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn create_and_fetch_table() {
    let app = test_app().await;
    let id = create_table(&app, 10).await;

    let (status, body) = send(&app, "GET", &format!("/api/tables/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["capacity"], 10);
    assert_eq!(body["planned_capacity"], 10);
    assert_eq!(body["available_capacity"], 10);
    assert_eq!(body["version"], 0);
}

#[tokio::test]
async fn create_table_rejects_non_positive_capacity() {
    let app = test_app().await;
    let (status, body) = send(&app, "POST", "/api/tables", Some(json!({ "capacity": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn missing_table_is_404() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/tables/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn full_admission_flow() {
    let app = test_app().await;
    let id = create_table(&app, 10).await;

    // RSVP: alice plus 3 accompanying guests
    let (status, body) = send(
        &app,
        "POST",
        "/api/guest-list/alice",
        Some(json!({ "table": id, "accompanying_guests": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "alice");
    assert_eq!(body["total_guests"], 4);

    let (_, table) = send(&app, "GET", &format!("/api/tables/{id}"), None).await;
    assert_eq!(table["planned_capacity"], 6);
    assert_eq!(table["available_capacity"], 10);

    // Check in
    let (status, body) = send(
        &app,
        "PUT",
        "/api/guests/alice",
        Some(json!({ "accompanying_guests": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_arrived_guests"], 4);
    assert!(body["arrival_time"].is_i64());

    let (_, table) = send(&app, "GET", &format!("/api/tables/{id}"), None).await;
    assert_eq!(table["available_capacity"], 6);

    let (status, body) = send(&app, "GET", "/api/guests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "alice");

    // Check out restores the occupancy envelope
    let (status, body) = send(&app, "DELETE", "/api/guests/alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_arrived_guests"], 0);
    assert!(body["arrival_time"].is_null());

    let (_, table) = send(&app, "GET", &format!("/api/tables/{id}"), None).await;
    assert_eq!(table["available_capacity"], 10);
    assert_eq!(table["planned_capacity"], 6);

    let (_, body) = send(&app, "GET", "/api/guests", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn duplicate_rsvp_is_conflict() {
    let app = test_app().await;
    let id = create_table(&app, 10).await;

    send(
        &app,
        "POST",
        "/api/guest-list/alice",
        Some(json!({ "table": id, "accompanying_guests": 3 })),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/guest-list/alice",
        Some(json!({ "table": id, "accompanying_guests": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn rsvp_over_capacity_is_conflict() {
    let app = test_app().await;
    let id = create_table(&app, 2).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/guest-list/bob",
        Some(json!({ "table": id, "accompanying_guests": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Rejection never mutates state.
    let (_, table) = send(&app, "GET", &format!("/api/tables/{id}"), None).await;
    assert_eq!(table["planned_capacity"], 2);
}

#[tokio::test]
async fn rsvp_for_missing_table_is_404() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/guest-list/alice",
        Some(json!({ "table": 42, "accompanying_guests": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn check_in_without_rsvp_is_404() {
    let app = test_app().await;
    create_table(&app, 10).await;
    let (status, _) = send(
        &app,
        "PUT",
        "/api/guests/carol",
        Some(json!({ "accompanying_guests": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn check_out_before_arrival_is_conflict() {
    let app = test_app().await;
    let id = create_table(&app, 10).await;
    send(
        &app,
        "POST",
        "/api/guest-list/alice",
        Some(json!({ "table": id, "accompanying_guests": 0 })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", "/api/guests/alice", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn negative_accompanying_guests_is_rejected() {
    let app = test_app().await;
    let id = create_table(&app, 10).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/guest-list/alice",
        Some(json!({ "table": id, "accompanying_guests": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/guests/alice",
        Some(json!({ "accompanying_guests": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn guest_list_paginates_with_defaults() {
    let app = test_app().await;
    let id = create_table(&app, 100).await;
    for i in 0..12 {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/guest-list/guest-{i}"),
            Some(json!({ "table": id, "accompanying_guests": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Default page size is 10
    let (_, body) = send(&app, "GET", "/api/guest-list", None).await;
    assert_eq!(body.as_array().unwrap().len(), 10);

    let (_, body) = send(&app, "GET", "/api/guest-list?limit=5&offset=10", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Oversized limits are clamped rather than rejected
    let (status, body) = send(&app, "GET", "/api/guest-list?limit=100000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn empty_seats_and_reset() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/seats/empty", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seats_empty"], 0);

    let a = create_table(&app, 4).await;
    create_table(&app, 6).await;
    send(
        &app,
        "POST",
        "/api/guest-list/alice",
        Some(json!({ "table": a, "accompanying_guests": 1 })),
    )
    .await;
    send(
        &app,
        "PUT",
        "/api/guests/alice",
        Some(json!({ "accompanying_guests": 1 })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/seats/empty", None).await;
    assert_eq!(body["seats_empty"], 8);

    let (status, _) = send(&app, "POST", "/api/tables/reset", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/seats/empty", None).await;
    assert_eq!(body["seats_empty"], 0);
    let (_, body) = send(&app, "GET", "/api/tables", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}
