#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Route-level tests for the inventory REST surface, driven through
//! `tower::ServiceExt::oneshot` against a scripted metric source.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use hostfleet_inventory::domain::source::{FetchError, MetricSource};
use hostfleet_inventory::InventoryService;

/// One healthy scripted host, everything else unreachable.
struct OneHost {
    hostname: &'static str,
}

#[async_trait]
impl MetricSource for OneHost {
    async fn property(&self, hostname: &str, name: &str) -> Result<String, FetchError> {
        self.check(hostname)?;
        match name {
            "os.name" => Ok("linux".to_owned()),
            "runtime.version" => Ok("1.86.0".to_owned()),
            other => Err(FetchError::UnknownRoute(format!("/property/{other}"))),
        }
    }

    async fn heap_size(&self, hostname: &str) -> Result<u64, FetchError> {
        self.check(hostname)?;
        Ok(4096)
    }

    async fn memory_used(&self, hostname: &str) -> Result<u64, FetchError> {
        self.check(hostname)?;
        Ok(1024)
    }

    async fn system_load(&self, hostname: &str) -> Result<f64, FetchError> {
        self.check(hostname)?;
        Ok(0.33)
    }
}

impl OneHost {
    fn check(&self, hostname: &str) -> Result<(), FetchError> {
        if hostname == self.hostname {
            Ok(())
        } else {
            Err(FetchError::Unreachable(format!(
                "{hostname}: no route to host"
            )))
        }
    }
}

fn router() -> axum::Router {
    let service = Arc::new(InventoryService::new(Arc::new(OneHost {
        hostname: "alpha",
    })));
    hostfleet_inventory::api::rest::router(service)
}

async fn send(
    router: &axum::Router,
    method: Method,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn manual_add_then_list_round_trips() {
    let app = router();

    let (status, body) = send(
        &app,
        Method::POST,
        "/systems?hostname=web-1&osName=linux&runtimeVersion=17&heapSize=2048",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], "web-1 was added.");

    let (status, body) = send(&app, Method::GET, "/systems").await;
    assert_eq!(status, StatusCode::OK);
    let systems = body.as_array().unwrap();
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0]["hostname"], "web-1");
    assert_eq!(systems[0]["runtimeVersion"], "17");
    assert_eq!(systems[0]["heapSize"], 2048);
    assert_eq!(systems[0]["memoryUsage"], 0.0);
    assert_eq!(systems[0]["systemLoad"], 0.0);
}

#[tokio::test]
async fn duplicate_add_is_a_conflict() {
    let app = router();
    let uri = "/systems?hostname=web-1&osName=linux&runtimeVersion=17&heapSize=2048";
    send(&app, Method::POST, uri).await;

    let (status, body) = send(&app, Method::POST, uri).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "web-1 already exists");
}

#[tokio::test]
async fn missing_query_params_are_a_bad_request() {
    let app = router();
    let (status, _) = send(&app, Method::POST, "/systems?hostname=web-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_host_lookup_is_a_404() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/systems/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "ghost does not exist");
}

#[tokio::test]
async fn update_and_remove_follow_the_record() {
    let app = router();
    send(
        &app,
        Method::POST,
        "/systems?hostname=web-1&osName=linux&runtimeVersion=17&heapSize=2048",
    )
    .await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/systems/web-1?osName=linux&runtimeVersion=21&heapSize=4096",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/systems/web-1").await;
    assert_eq!(body["runtimeVersion"], "21");
    assert_eq!(body["heapSize"], 4096);

    let (status, _) = send(&app, Method::DELETE, "/systems/web-1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/systems/web-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn probe_registration_returns_the_new_record() {
    let app = router();

    let (status, body) = send(&app, Method::POST, "/systems/client/alpha").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hostname"], "alpha");
    assert_eq!(body["osName"], "linux");
    assert_eq!(body["runtimeVersion"], "1.86.0");
    assert_eq!(body["heapSize"], 4096);
}

#[tokio::test]
async fn probe_registration_of_a_dead_host_is_a_bad_gateway() {
    let app = router();

    let (status, body) = send(&app, Method::POST, "/systems/client/ghost").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("unreachable"));

    // no partial record was left behind
    let (_, body) = send(&app, Method::GET, "/systems").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn batch_load_update_reports_the_outcome() {
    let app = router();
    send(&app, Method::POST, "/systems/client/alpha").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/systems/loads?afterSecs=0&deadlineSecs=5",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["completed"], 1);
    assert_eq!(body["deadlineHit"], false);

    let (_, body) = send(&app, Method::GET, "/systems/alpha").await;
    assert_eq!(body["systemLoad"], 0.33);
}

#[tokio::test]
async fn reset_zeroes_metrics_over_the_api() {
    let app = router();
    send(&app, Method::POST, "/systems/client/alpha").await;
    send(&app, Method::POST, "/systems/loads?deadlineSecs=5").await;

    let (status, _) = send(&app, Method::POST, "/systems/reset").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/systems/alpha").await;
    assert_eq!(body["systemLoad"], 0.0);
    assert_eq!(body["heapSize"], 4096);
}

#[tokio::test]
async fn memory_sweep_is_acknowledged_and_applies() {
    let app = router();
    send(&app, Method::POST, "/systems/client/alpha").await;

    let (status, body) = send(&app, Method::POST, "/systems/memory").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], "memory refresh scheduled.");

    // fire-and-forget: give the detached task a moment to land
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    let (_, body) = send(&app, Method::GET, "/systems/alpha").await;
    assert_eq!(body["memoryUsage"], 0.25);
}
