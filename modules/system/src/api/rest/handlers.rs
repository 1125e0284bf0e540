use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::collector::SystemCollector;

pub async fn property(
    Extension(collector): Extension<Arc<SystemCollector>>,
    Path(name): Path<String>,
) -> Result<String, StatusCode> {
    collector.property(&name).ok_or(StatusCode::NOT_FOUND)
}

pub async fn heap_size(Extension(collector): Extension<Arc<SystemCollector>>) -> String {
    collector.heap_size().to_string()
}

pub async fn memory_used(Extension(collector): Extension<Arc<SystemCollector>>) -> Json<u64> {
    Json(collector.memory_used())
}

pub async fn system_load(Extension(collector): Extension<Arc<SystemCollector>>) -> Json<f64> {
    Json(collector.system_load())
}
