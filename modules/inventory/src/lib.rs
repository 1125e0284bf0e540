//! Fleet inventory: polls remote hosts for runtime metrics over HTTP and
//! keeps an in-memory registry of per-host records.
//!
//! The module is layered the usual way: `domain` holds the registry, the
//! record model, and the polling orchestration; `infra` provides the
//! HTTP-backed metric source; `api::rest` exposes the inventory over axum.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use config::InventoryConfig;
pub use domain::service::InventoryService;
