use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Extension, Path, Query};
use axum::Json;

use crate::domain::service::InventoryService;

use super::dto::{
    BatchLoadQuery, BatchOutcomeDto, RegisterQuery, StatusBody, SweepQuery, SystemDto, UpdateQuery,
};
use super::error::ApiResult;

pub async fn list_systems(
    Extension(svc): Extension<Arc<InventoryService>>,
) -> Json<Vec<SystemDto>> {
    Json(svc.list().into_iter().map(SystemDto::from).collect())
}

pub async fn get_system(
    Extension(svc): Extension<Arc<InventoryService>>,
    Path(hostname): Path<String>,
) -> ApiResult<Json<SystemDto>> {
    let snapshot = svc.get(&hostname)?;
    Ok(Json(snapshot.into()))
}

pub async fn add_system(
    Extension(svc): Extension<Arc<InventoryService>>,
    Query(req): Query<RegisterQuery>,
) -> ApiResult<Json<StatusBody>> {
    svc.register(
        &req.hostname,
        &req.os_name,
        &req.runtime_version,
        req.heap_size,
    )?;
    Ok(Json(StatusBody::new(format!("{} was added.", req.hostname))))
}

pub async fn add_system_from_host(
    Extension(svc): Extension<Arc<InventoryService>>,
    Path(hostname): Path<String>,
) -> ApiResult<Json<SystemDto>> {
    let snapshot = svc.register_from_host(&hostname).await?;
    Ok(Json(snapshot.into()))
}

pub async fn update_system(
    Extension(svc): Extension<Arc<InventoryService>>,
    Path(hostname): Path<String>,
    Query(req): Query<UpdateQuery>,
) -> ApiResult<Json<StatusBody>> {
    svc.update(&hostname, &req.os_name, &req.runtime_version, req.heap_size)?;
    Ok(Json(StatusBody::new(format!("{hostname} was updated."))))
}

pub async fn remove_system(
    Extension(svc): Extension<Arc<InventoryService>>,
    Path(hostname): Path<String>,
) -> ApiResult<Json<StatusBody>> {
    svc.remove(&hostname)?;
    Ok(Json(StatusBody::new(format!("{hostname} was removed."))))
}

pub async fn reset_systems(
    Extension(svc): Extension<Arc<InventoryService>>,
) -> Json<StatusBody> {
    svc.reset_metrics();
    Json(StatusBody::new("metrics were reset."))
}

/// Fire-and-forget memory sweep; the response only acknowledges scheduling.
pub async fn sweep_memory(
    Extension(svc): Extension<Arc<InventoryService>>,
    Query(req): Query<SweepQuery>,
) -> Json<StatusBody> {
    svc.refresh_memory_all(Duration::from_secs(req.after_secs));
    Json(StatusBody::new("memory refresh scheduled."))
}

/// Batch load update. Responds with the aggregate outcome; a deadline hit is
/// still a success, late hosts just keep their stale load until next time.
pub async fn update_loads(
    Extension(svc): Extension<Arc<InventoryService>>,
    Query(req): Query<BatchLoadQuery>,
) -> Json<BatchOutcomeDto> {
    let outcome = svc
        .update_loads(
            Duration::from_secs(req.after_secs),
            Duration::from_secs(req.deadline_secs),
        )
        .await;
    Json(outcome.into())
}
