use async_trait::async_trait;

/// Property name for the remote host's operating system.
pub const OS_NAME_PROPERTY: &str = "os.name";

/// Property name for the remote host's runtime version.
pub const RUNTIME_VERSION_PROPERTY: &str = "runtime.version";

/// Failure modes of a single metric fetch.
///
/// `UnknownRoute` is kept separate from `BadStatus` so callers can tell
/// "host down" apart from "host up but does not expose this metric".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("host unreachable: {0}")]
    Unreachable(String),

    #[error("remote responded with HTTP {0}")]
    BadStatus(u16),

    #[error("remote does not expose {0}")]
    UnknownRoute(String),

    #[error("could not decode response for {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Read-only metric operations a monitored host exposes.
///
/// One method per remote endpoint. Implementations do not retry; retry
/// policy, if any, belongs to the caller.
#[async_trait]
pub trait MetricSource: Send + Sync {
    async fn property(&self, hostname: &str, name: &str) -> Result<String, FetchError>;

    async fn heap_size(&self, hostname: &str) -> Result<u64, FetchError>;

    async fn memory_used(&self, hostname: &str) -> Result<u64, FetchError>;

    /// System load of the host. May legitimately be negative where the
    /// platform does not report a load average.
    async fn system_load(&self, hostname: &str) -> Result<f64, FetchError>;
}
