use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::{get, post};
use axum::Router;

use crate::domain::service::InventoryService;

use super::handlers;

/// Build the inventory REST router; the caller nests it under its prefix.
pub fn router(service: Arc<InventoryService>) -> Router {
    Router::new()
        .route(
            "/systems",
            get(handlers::list_systems).post(handlers::add_system),
        )
        .route(
            "/systems/{hostname}",
            get(handlers::get_system)
                .put(handlers::update_system)
                .delete(handlers::remove_system),
        )
        .route("/systems/client/{hostname}", post(handlers::add_system_from_host))
        .route("/systems/reset", post(handlers::reset_systems))
        .route("/systems/memory", post(handlers::sweep_memory))
        .route("/systems/loads", post(handlers::update_loads))
        .layer(Extension(service))
}
