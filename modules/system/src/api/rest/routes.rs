use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::get;
use axum::Router;

use crate::collector::SystemCollector;

use super::handlers;

/// Build the system endpoint router; the caller nests it under its prefix.
pub fn router(collector: Arc<SystemCollector>) -> Router {
    Router::new()
        .route("/property/{name}", get(handlers::property))
        .route("/heapsize", get(handlers::heap_size))
        .route("/memoryUsed", get(handlers::memory_used))
        .route("/systemLoad", get(handlers::system_load))
        .layer(Extension(collector))
}
