use std::sync::Arc;
use std::time::Duration;

use crate::domain::error::InventoryError;
use crate::domain::model::SystemRecord;
use crate::domain::source::{
    FetchError, MetricSource, OS_NAME_PROPERTY, RUNTIME_VERSION_PROPERTY,
};

/// Fetches metrics for one host and merges them into a record.
pub struct SystemProbe {
    source: Arc<dyn MetricSource>,
}

impl SystemProbe {
    pub fn new(source: Arc<dyn MetricSource>) -> Self {
        Self { source }
    }

    /// Build a fresh record for `hostname`.
    ///
    /// The three identity fetches run concurrently and all of them must
    /// succeed; a single failure fails the whole creation and no partial
    /// record is produced. Metric fields start at zero.
    pub async fn collect_record(&self, hostname: &str) -> Result<SystemRecord, InventoryError> {
        let (os_name, runtime_version, heap_size) = tokio::try_join!(
            self.source.property(hostname, OS_NAME_PROPERTY),
            self.source.property(hostname, RUNTIME_VERSION_PROPERTY),
            self.source.heap_size(hostname),
        )?;

        if heap_size == 0 {
            return Err(InventoryError::Validation(format!(
                "{hostname} reported a zero heap size"
            )));
        }

        Ok(SystemRecord::new(hostname, os_name, runtime_version, heap_size))
    }

    /// Fetch the host's used memory and write the usage ratio into the
    /// record. On failure the record keeps its last-known value.
    pub async fn refresh_memory(&self, record: &SystemRecord) -> Result<(), FetchError> {
        let used = self.source.memory_used(record.hostname()).await?;
        record.set_memory_used(used);
        Ok(())
    }

    /// Wait `after` (settle time), then fetch the host's system load.
    ///
    /// The sampled value is returned, not written; the caller owns the write
    /// so it can coordinate it with its own completion signaling.
    pub async fn sample_load(
        &self,
        record: &SystemRecord,
        after: Duration,
    ) -> Result<f64, FetchError> {
        if !after.is_zero() {
            tokio::time::sleep(after).await;
        }
        self.source.system_load(record.hostname()).await
    }
}
