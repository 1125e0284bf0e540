#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Route-level tests for the system endpoint.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use hostfleet_system::SystemCollector;
use tower::util::ServiceExt;

fn router() -> axum::Router {
    hostfleet_system::api::router(Arc::new(SystemCollector::new()))
}

async fn get_body(path: &str) -> (StatusCode, String) {
    let response = router()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn os_name_property_is_served_as_text() {
    let (status, body) = get_body("/property/os.name").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
}

#[tokio::test]
async fn unknown_property_is_a_404() {
    let (status, _) = get_body("/property/cpu.teeth").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn heap_size_is_a_positive_number() {
    let (status, body) = get_body("/heapsize").await;
    assert_eq!(status, StatusCode::OK);
    let bytes: u64 = body.trim().parse().unwrap();
    assert!(bytes > 0);
}

#[tokio::test]
async fn memory_used_parses_as_a_number() {
    let (status, body) = get_body("/memoryUsed").await;
    assert_eq!(status, StatusCode::OK);
    let used: u64 = body.trim().parse().unwrap();
    assert!(used > 0);
}

#[tokio::test]
async fn system_load_parses_as_a_float() {
    let (status, body) = get_body("/systemLoad").await;
    assert_eq!(status, StatusCode::OK);
    let _load: f64 = body.trim().parse().unwrap();
}
