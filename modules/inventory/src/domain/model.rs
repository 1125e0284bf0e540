use parking_lot::RwLock;

/// Mutable metric fields of a record, refreshed by background tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    /// Fraction of the heap in use, `used_bytes / heap_size`
    pub memory_usage: f64,
    /// Last sampled system load; may be negative where the platform
    /// reports no load average
    pub system_load: f64,
}

/// Last-known state of one monitored host.
///
/// Identity fields (`hostname`, `os_name`, `runtime_version`, `heap_size`)
/// are set once at construction; metric fields live behind a lock so refresh
/// tasks can write them while the record is shared.
#[derive(Debug)]
pub struct SystemRecord {
    hostname: String,
    os_name: String,
    runtime_version: String,
    heap_size: u64,
    metrics: RwLock<Metrics>,
}

impl SystemRecord {
    pub fn new(
        hostname: impl Into<String>,
        os_name: impl Into<String>,
        runtime_version: impl Into<String>,
        heap_size: u64,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            os_name: os_name.into(),
            runtime_version: runtime_version.into(),
            heap_size,
            metrics: RwLock::new(Metrics::default()),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }

    pub fn heap_size(&self) -> u64 {
        self.heap_size
    }

    pub fn metrics(&self) -> Metrics {
        *self.metrics.read()
    }

    /// Store a fresh memory sample as a usage ratio against the heap size.
    pub fn set_memory_used(&self, used_bytes: u64) {
        let ratio = used_bytes as f64 / self.heap_size as f64;
        self.metrics.write().memory_usage = ratio;
    }

    pub fn set_system_load(&self, load: f64) {
        self.metrics.write().system_load = load;
    }

    /// Zero the metric fields, leaving the identity fields untouched.
    pub fn reset_metrics(&self) {
        *self.metrics.write() = Metrics::default();
    }

    pub fn snapshot(&self) -> RecordSnapshot {
        let metrics = self.metrics();
        RecordSnapshot {
            hostname: self.hostname.clone(),
            os_name: self.os_name.clone(),
            runtime_version: self.runtime_version.clone(),
            heap_size: self.heap_size,
            memory_usage: metrics.memory_usage,
            system_load: metrics.system_load,
        }
    }
}

/// Point-in-time view of a record, detached from the shared state.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSnapshot {
    pub hostname: String,
    pub os_name: String,
    pub runtime_version: String,
    pub heap_size: u64,
    pub memory_usage: f64,
    pub system_load: f64,
}
