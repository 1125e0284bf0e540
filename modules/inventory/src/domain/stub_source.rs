//! Scripted metric source for domain tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::source::{FetchError, MetricSource};

/// Per-host behavior of the stub.
#[derive(Debug, Clone)]
pub(crate) struct StubHost {
    pub os_name: String,
    pub runtime_version: String,
    pub heap_size: u64,
    pub memory_used: u64,
    pub system_load: f64,
    /// Added latency before every reply from this host
    pub latency: Duration,
    /// When set, every fetch from this host fails with this error
    pub failure: Option<FetchError>,
    /// When set, only the heap-size fetch fails with this error
    pub heap_failure: Option<FetchError>,
}

impl Default for StubHost {
    fn default() -> Self {
        Self {
            os_name: "linux".to_owned(),
            runtime_version: "1.85.0".to_owned(),
            heap_size: 2048,
            memory_used: 1024,
            system_load: 0.42,
            latency: Duration::ZERO,
            failure: None,
            heap_failure: None,
        }
    }
}

/// `MetricSource` whose replies are scripted per hostname.
///
/// Hosts that were never scripted behave as unreachable. Fetch counts are
/// recorded so tests can assert how often a host was hit.
#[derive(Default)]
pub(crate) struct StubSource {
    hosts: HashMap<String, StubHost>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, hostname: &str, host: StubHost) -> Self {
        self.hosts.insert(hostname.to_owned(), host);
        self
    }

    pub fn fetch_count(&self, hostname: &str) -> usize {
        self.fetches.lock().get(hostname).copied().unwrap_or(0)
    }

    async fn host(&self, hostname: &str) -> Result<StubHost, FetchError> {
        *self.fetches.lock().entry(hostname.to_owned()).or_insert(0) += 1;
        let host = self
            .hosts
            .get(hostname)
            .cloned()
            .ok_or_else(|| FetchError::Unreachable(format!("{hostname}: no route to host")))?;
        if !host.latency.is_zero() {
            tokio::time::sleep(host.latency).await;
        }
        if let Some(failure) = &host.failure {
            return Err(failure.clone());
        }
        Ok(host)
    }
}

#[async_trait]
impl MetricSource for StubSource {
    async fn property(&self, hostname: &str, name: &str) -> Result<String, FetchError> {
        let host = self.host(hostname).await?;
        match name {
            crate::domain::source::OS_NAME_PROPERTY => Ok(host.os_name),
            crate::domain::source::RUNTIME_VERSION_PROPERTY => Ok(host.runtime_version),
            other => Err(FetchError::UnknownRoute(format!("/property/{other}"))),
        }
    }

    async fn heap_size(&self, hostname: &str) -> Result<u64, FetchError> {
        let host = self.host(hostname).await?;
        if let Some(failure) = host.heap_failure {
            return Err(failure);
        }
        Ok(host.heap_size)
    }

    async fn memory_used(&self, hostname: &str) -> Result<u64, FetchError> {
        Ok(self.host(hostname).await?.memory_used)
    }

    async fn system_load(&self, hostname: &str) -> Result<f64, FetchError> {
        Ok(self.host(hostname).await?.system_load)
    }
}
