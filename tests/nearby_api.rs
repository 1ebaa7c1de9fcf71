//! Nearby search endpoint tests
//!
//! Black-box coverage of GET /addresses/nearby/:
//! - inclusion is decided on the exact geodesic distance (<= radius), the
//!   reported distance_km is rounded to 2 decimals
//! - the radius defaults to 5 km and must be positive
//! - an empty result set is a 404, never an empty array
//!
//! Each test boots the full router over a fresh temporary database and
//! drives it through tower's `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use geobook::api::ApiServer;
use geobook::config::AppConfig;
use geobook::storage::Storage;

// =============================================================================
// Test Utilities
// =============================================================================

async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Storage::connect(&dir.path().join("address_book.db"))
        .await
        .expect("Failed to open storage");
    let server = ApiServer::new(AppConfig::default(), Arc::new(storage));
    (server.router(), dir)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    // Framework-level query rejections arrive as plain text, not JSON.
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

async fn seed(app: &Router, name: &str, lat: f64, lon: f64) -> i64 {
    let body = json!({
        "name": name,
        "street": "1 Test St",
        "city": "Testville",
        "latitude": lat,
        "longitude": lon
    });
    let request = Request::builder()
        .method("POST")
        .uri("/addresses/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    value["id"].as_i64().unwrap()
}

// =============================================================================
// Inclusion and distance reporting
// =============================================================================

#[tokio::test]
async fn test_includes_record_within_radius() {
    let (app, _dir) = test_app().await;
    let id = seed(&app, "Origin", 0.0, 0.0).await;

    // 0.0001 degrees of longitude at the equator is about 11 m away.
    let (status, body) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.0001&distance_km=1.0").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], id);
    assert_eq!(results[0]["name"], "Origin");
    assert_eq!(results[0]["distance_km"], 0.01);

    // A radius tighter than the actual distance excludes the record.
    let (status, _) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.0001&distance_km=0.001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_query_point_on_top_of_record() {
    let (app, _dir) = test_app().await;
    seed(&app, "Origin", 12.5, 45.5).await;

    let (status, body) = get(&app, "/addresses/nearby/?lat=12.5&lon=45.5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["distance_km"], 0.0);
}

#[tokio::test]
async fn test_filter_uses_exact_distance_not_rounded() {
    let (app, _dir) = test_app().await;
    // 0.001 degrees of longitude at the equator: about 0.1113 km, which
    // rounds to 0.11 in the response.
    seed(&app, "Origin", 0.0, 0.0).await;

    // Just above the true distance: included, reported rounded.
    let (status, body) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.001&distance_km=0.112").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["distance_km"], 0.11);

    // Between the rounded and the true distance: excluded.
    let (status, _) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.001&distance_km=0.111").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_default_radius_is_five_km() {
    let (app, _dir) = test_app().await;
    // About 4.45 km from the query point.
    let near = seed(&app, "Near", 0.0, 0.04).await;
    // About 111 km away.
    seed(&app, "Far", 0.0, 1.0).await;

    let (status, body) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.0").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], near);
}

#[tokio::test]
async fn test_multiple_matches_keep_storage_order() {
    let (app, _dir) = test_app().await;
    let first = seed(&app, "A", 0.0, 0.001).await;
    let second = seed(&app, "B", 0.0, 0.002).await;
    let third = seed(&app, "C", 0.001, 0.0).await;

    let (status, body) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.0&distance_km=2.0").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second, third]);
}

// =============================================================================
// Radius validation
// =============================================================================

#[tokio::test]
async fn test_zero_radius_is_rejected() {
    let (app, _dir) = test_app().await;
    seed(&app, "Origin", 0.0, 0.0).await;

    let (status, body) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.0&distance_km=0.0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Search radius (distance_km) must be a positive number."
    );
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_negative_radius_is_rejected() {
    let (app, _dir) = test_app().await;

    let (status, _) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.0&distance_km=-2.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_coordinates_are_rejected() {
    let (app, _dir) = test_app().await;

    let (status, _) = get(&app, "/addresses/nearby/?lon=0.0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Empty results
// =============================================================================

#[tokio::test]
async fn test_empty_storage_returns_404() {
    let (app, _dir) = test_app().await;

    let (status, body) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.0").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "No addresses found within 5.0 km of the specified location."
    );
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_no_match_within_radius_returns_404() {
    let (app, _dir) = test_app().await;
    seed(&app, "Far", 50.0, 50.0).await;

    let (status, _) = get(&app, "/addresses/nearby/?lat=0.0&lon=0.0&distance_km=100.0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
