use std::sync::Arc;
use std::time::Duration;

use crate::domain::error::InventoryError;
use crate::domain::model::{RecordSnapshot, SystemRecord};
use crate::domain::probe::SystemProbe;
use crate::domain::refresh::{self, BatchOutcome, RefreshKind};
use crate::domain::registry::Registry;
use crate::domain::source::MetricSource;

/// Service for managing the fleet inventory.
///
/// Owns the registry and the probe; the REST layer and background sweeps go
/// through here. Constructed per instance and injected, so tests get a fresh
/// registry each.
pub struct InventoryService {
    registry: Arc<Registry>,
    probe: Arc<SystemProbe>,
}

impl InventoryService {
    pub fn new(source: Arc<dyn MetricSource>) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            probe: Arc::new(SystemProbe::new(source)),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn list(&self) -> Vec<RecordSnapshot> {
        self.registry.list().iter().map(|r| r.snapshot()).collect()
    }

    pub fn get(&self, hostname: &str) -> Result<RecordSnapshot, InventoryError> {
        self.registry
            .get(hostname)
            .map(|r| r.snapshot())
            .ok_or_else(|| InventoryError::NotFound(hostname.to_owned()))
    }

    /// Register a host with caller-supplied identity fields.
    pub fn register(
        &self,
        hostname: &str,
        os_name: &str,
        runtime_version: &str,
        heap_size: u64,
    ) -> Result<RecordSnapshot, InventoryError> {
        validate_heap_size(hostname, heap_size)?;
        let record = self
            .registry
            .insert(SystemRecord::new(hostname, os_name, runtime_version, heap_size))?;
        tracing::info!(hostname = %record.hostname(), "host registered");
        Ok(record.snapshot())
    }

    /// Register a host by probing it for its identity fields.
    ///
    /// All three initial fetches must succeed; a fetch failure surfaces as
    /// `Fetch`, distinct from `AlreadyExists`, and nothing is inserted.
    pub async fn register_from_host(
        &self,
        hostname: &str,
    ) -> Result<RecordSnapshot, InventoryError> {
        if self.registry.get(hostname).is_some() {
            return Err(InventoryError::AlreadyExists(hostname.to_owned()));
        }
        let record = self.probe.collect_record(hostname).await?;
        // insert re-checks under the lock; a concurrent winner turns this
        // into AlreadyExists rather than a second record
        let record = self.registry.insert(record)?;
        tracing::info!(hostname = %record.hostname(), "host registered from probe");
        Ok(record.snapshot())
    }

    /// Replace an existing record's identity fields. Metrics restart at zero
    /// since the old ratio denominator no longer applies.
    pub fn update(
        &self,
        hostname: &str,
        os_name: &str,
        runtime_version: &str,
        heap_size: u64,
    ) -> Result<RecordSnapshot, InventoryError> {
        validate_heap_size(hostname, heap_size)?;
        let record = self
            .registry
            .replace(SystemRecord::new(hostname, os_name, runtime_version, heap_size))?;
        Ok(record.snapshot())
    }

    pub fn remove(&self, hostname: &str) -> Result<(), InventoryError> {
        self.registry.remove(hostname)?;
        tracing::info!(hostname, "host removed");
        Ok(())
    }

    /// Zero every record's metrics, identities untouched.
    pub fn reset_metrics(&self) {
        self.registry.reset_all();
    }

    /// Fire-and-forget memory sweep over the current fleet snapshot.
    pub fn refresh_memory_all(&self, after: Duration) {
        refresh::spawn_refresh(&self.probe, self.registry.list(), after, RefreshKind::Memory);
    }

    /// Batch load update over the current fleet snapshot; waits for every
    /// host or `deadline`, whichever comes first. Deadline expiry is a
    /// normal outcome.
    pub async fn update_loads(&self, after: Duration, deadline: Duration) -> BatchOutcome {
        refresh::update_fleet_load(&self.probe, self.registry.list(), after, deadline).await
    }
}

fn validate_heap_size(hostname: &str, heap_size: u64) -> Result<(), InventoryError> {
    if heap_size == 0 {
        return Err(InventoryError::Validation(format!(
            "{hostname}: heap size must be non-zero"
        )));
    }
    Ok(())
}
