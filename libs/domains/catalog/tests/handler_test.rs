//! Handler tests for the catalog domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (query strings, JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! Unlike E2E tests, these test ONLY the catalog domain handlers,
//! not the full application with routing, CORS middleware, etc.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn item(id: i64, name: &str, category: &str, price: f64) -> Item {
    Item {
        id,
        name: name.to_string(),
        category: Some(category.to_string()),
        price,
        description: None,
    }
}

/// 5 items: 3 Electronics, 2 Furniture.
fn seed_items() -> Vec<Item> {
    vec![
        item(1, "Laptop", "Electronics", 1200.0),
        item(2, "Desk Chair", "Furniture", 150.0),
        item(3, "Monitor", "Electronics", 300.0),
        item(4, "Bookshelf", "Furniture", 90.0),
        item(5, "Keyboard", "Electronics", 60.0),
    ]
}

async fn seeded_service(items: &[Item]) -> (TempDir, Arc<JsonFileStore>, CatalogService<JsonFileStore>) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("items.json")));
    store.save(items).await.unwrap();
    let service = CatalogService::new(Arc::clone(&store));
    (dir, store, service)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_list_items_returns_all_by_default() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ItemPage = json_body(response.into_body()).await;
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_list_items_search_is_case_insensitive() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app.oneshot(get("/?q=electronics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ItemPage = json_body(response.into_body()).await;
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);
}

#[tokio::test]
async fn test_list_items_paginates() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app.oneshot(get("/?page=1&limit=2")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ItemPage = json_body(response.into_body()).await;
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn test_list_items_page_beyond_range_is_empty_not_error() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app.oneshot(get("/?page=9&limit=2")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ItemPage = json_body(response.into_body()).await;
    assert!(page.items.is_empty());
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn test_list_items_malformed_pagination_degrades_to_defaults() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app.oneshot(get("/?page=oops&limit=nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ItemPage = json_body(response.into_body()).await;
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    assert_eq!(page.items.len(), 5);
}

#[tokio::test]
async fn test_get_item_by_id() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app.oneshot(get("/3")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let found: Item = json_body(response.into_body()).await;
    assert_eq!(found.name, "Monitor");
    assert_eq!(found.price, 300.0);
}

#[tokio::test]
async fn test_get_unknown_item_returns_404_message() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app.oneshot(get("/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn test_get_non_numeric_id_returns_404() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app.oneshot(get("/not-a-number")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_item_returns_201_and_persists() {
    let (_dir, store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "name": "Standing Desk",
                "category": "Furniture",
                "price": 499.0,
                "description": "Height adjustable"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Item = json_body(response.into_body()).await;
    assert_eq!(created.name, "Standing Desk");
    assert!(created.id > 0, "server assigns the id");

    // Appended to the backing file
    let on_disk = store.load().await.unwrap();
    assert_eq!(on_disk.len(), 6);
    assert_eq!(on_disk.last().unwrap().name, "Standing Desk");
}

#[tokio::test]
async fn test_create_item_missing_name_and_price_is_400_without_write() {
    let (_dir, store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app
        .oneshot(post_json("/", json!({"category": "X"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert!(body["message"].is_string());

    // Nothing was written
    let on_disk = store.load().await.unwrap();
    assert_eq!(on_disk.len(), 5);
}

#[tokio::test]
async fn test_create_item_missing_price_is_400() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app
        .oneshot(post_json("/", json!({"name": "Webcam"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_item_empty_name_is_400() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app
        .oneshot(post_json("/", json!({"name": "", "price": 1.0})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_item_duplicate_name_is_400() {
    let (_dir, _store, service) = seeded_service(&seed_items()).await;
    let app = handlers::router(service);

    let response = app
        .oneshot(post_json("/", json!({"name": "Laptop", "price": 999.0})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_stats_endpoint_reports_count_and_average() {
    let (_dir, _store, service) = seeded_service(&[
        item(1, "A", "X", 100.0),
        item(2, "B", "X", 300.0),
    ])
    .await;
    let app = handlers::stats_router(service);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["averagePrice"], 200.0);
}

#[tokio::test]
async fn test_stats_endpoint_for_empty_store() {
    let (_dir, _store, service) = seeded_service(&[]).await;
    let app = handlers::stats_router(service);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["averagePrice"], 0.0);
}

#[tokio::test]
async fn test_stats_endpoint_serves_fresh_snapshot_after_change_handler() {
    let (_dir, store, service) = seeded_service(&[item(1, "A", "X", 100.0)]).await;
    let cache = service.stats_cache();
    let app = handlers::stats_router(service);

    let first = app.clone().oneshot(get("/")).await.unwrap();
    let body: serde_json::Value = json_body(first.into_body()).await;
    assert_eq!(body["total"], 1);

    // Mutate the backing file directly, then run the change handler
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    store
        .save(&[item(1, "A", "X", 100.0), item(2, "B", "X", 300.0)])
        .await
        .unwrap();
    assert!(cache.refresh_if_modified().await.unwrap());

    let second = app.oneshot(get("/")).await.unwrap();
    let body: serde_json::Value = json_body(second.into_body()).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["averagePrice"], 200.0);
}

#[tokio::test]
async fn test_list_items_missing_file_is_500_message() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("absent.json")));
    let service = CatalogService::new(store);
    let app = handlers::router(service);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert!(body["message"].is_string());
}
