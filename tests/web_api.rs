// Integration tests for the HTTP API.
//
// Each test builds the router over an in-memory store and drives it with
// tower's oneshot, without binding a socket.

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rusqlite::Connection;
use serde_json::Value;
use tower::ServiceExt;

use threatlens::config::Config;
use threatlens::db::models::NewRecord;
use threatlens::db::{schema, RecordStore, SqliteStore};
use threatlens::web::{build_router, AppState};

async fn app_with(records: &[(&str, &str, &str, Option<&str>)]) -> Router {
    let conn = Connection::open_in_memory().unwrap();
    schema::create_tables(&conn).unwrap();
    let store = SqliteStore::new(conn);
    for (headline, source, ts, category) in records {
        store
            .insert_if_absent(&NewRecord {
                source: source.to_string(),
                headline: headline.to_string(),
                timestamp: ts.to_string(),
                category: category.map(str::to_string),
                bias: None,
            })
            .await
            .unwrap();
    }

    build_router(AppState {
        store: Arc::new(store),
        config: Arc::new(Config::default()),
    })
}

async fn seeded_app() -> Router {
    app_with(&[
        ("Storm hits coast", "https://a.test/1", "2024-06-09 08:00:00", Some("Environment")),
        ("War spreads in Gaza", "https://a.test/2", "2024-06-10 08:00:00", Some("Conflict")),
        ("Markets wobble", "https://a.test/3", "2024-06-10 09:00:00", Some("Economy")),
    ])
    .await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn health_is_ok() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn threats_lists_every_record_with_camel_case_keys() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/threats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);

    let first = &body["items"][0];
    assert_eq!(first["id"], 3);
    assert!(first.get("threatType").is_some());
    assert!(first.get("locationScope").is_some());
    assert!(first.get("locationName").is_some());
    assert_eq!(first["sources"], serde_json::json!(["https://a.test/3"]));
    assert_eq!(first["trend"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn threats_filter_and_blank_params() {
    let app = seeded_app().await;
    let (_, body) = get(&app, "/api/threats?threatType=Armed%20Conflict&emergency=&maturity=").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], "War spreads in Gaza");
    assert_eq!(body["items"][0]["locationName"], "Middle East");
}

#[tokio::test]
async fn threats_bad_paging_falls_back_to_defaults() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/threats?limit=lots&offset=-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);

    let (_, body) = get(&app, "/api/threats?limit=1&offset=1").await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["id"], 2);
}

#[tokio::test]
async fn analysis_found_and_missing() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/analysis/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Armed Conflict");
    assert_eq!(body["regions"], serde_json::json!(["Middle East"]));

    let (status, body) = get(&app, "/api/analysis/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "not found" }));

    let (status, _) = get(&app, "/api/analysis/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn news_and_dates() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/news?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["headline"], "Markets wobble");

    let (_, body) = get(&app, "/api/news?date=2024-06-09").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = get(&app, "/api/dates").await;
    assert_eq!(body, serde_json::json!(["2024-06-10", "2024-06-09"]));
}

#[tokio::test]
async fn classify_updates_stats() {
    let app = seeded_app().await;
    let (status, body) = post_json(
        &app,
        "/api/classify/3",
        serde_json::json!({ "category": "Conflict", "bias": "Potential Bias" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "ok": true }));

    let (_, stats) = get(&app, "/api/stats").await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["categories"]["Conflict"], 2);
    assert_eq!(stats["severity"]["Potential Bias"], 1);
    assert_eq!(stats["severity"]["Unclassified"], 2);

    let (_, insights) = get(&app, "/api/insights").await;
    assert_eq!(insights["insights"], "Some articles flagged as biased.");
}

#[tokio::test]
async fn classify_without_body_clears_both_tags() {
    let app = seeded_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/classify/2")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "ok": true }));

    let (_, stats) = get(&app, "/api/stats").await;
    assert_eq!(stats["categories"]["Unclassified"], 1);
    assert!(stats["categories"].get("Conflict").is_none());
    assert_eq!(stats["severity"]["Unclassified"], 3);
}

#[tokio::test]
async fn classify_malformed_body_is_400() {
    let app = seeded_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/classify/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid body");
}

#[tokio::test]
async fn classify_unknown_id_is_404() {
    let app = seeded_app().await;
    let (status, body) = post_json(&app, "/api/classify/42", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn empty_store_insights_are_stable() {
    let app = app_with(&[]).await;
    let (_, body) = get(&app, "/api/insights").await;
    assert_eq!(body["insights"], "Situation stable. No critical alerts today.");
    let (_, body) = get(&app, "/api/threats").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn unknown_path_without_static_dir_is_json_404() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}
