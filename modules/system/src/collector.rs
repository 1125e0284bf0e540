use parking_lot::Mutex;
use sysinfo::System;

/// Collects runtime metrics for the current host.
///
/// Memory figures are refreshed on every read; the identity-ish properties
/// (OS name, version, arch) are stable for the life of the process.
pub struct SystemCollector {
    system: Mutex<System>,
}

impl SystemCollector {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new_all()),
        }
    }

    /// Look up a named property. Unknown names return `None`, which the REST
    /// layer turns into a 404 so pollers see them as an unknown route.
    pub fn property(&self, name: &str) -> Option<String> {
        match name {
            "os.name" => {
                Some(System::name().unwrap_or_else(|| std::env::consts::OS.to_owned()))
            }
            "os.version" => Some(System::os_version().unwrap_or_else(|| "unknown".to_owned())),
            "os.arch" => Some(std::env::consts::ARCH.to_owned()),
            "hostname" => Some(
                hostname::get()
                    .map(|h| h.to_string_lossy().into_owned())
                    .unwrap_or_else(|_| "unknown".to_owned()),
            ),
            "runtime.version" => Some(env!("CARGO_PKG_VERSION").to_owned()),
            _ => {
                tracing::debug!(name, "unknown property requested");
                None
            }
        }
    }

    /// Total memory of the host, in bytes. The inventory uses this as the
    /// denominator for its usage ratio.
    pub fn heap_size(&self) -> u64 {
        let mut sys = self.system.lock();
        sys.refresh_memory();
        sys.total_memory()
    }

    /// Memory currently in use, in bytes.
    pub fn memory_used(&self) -> u64 {
        let mut sys = self.system.lock();
        sys.refresh_memory();
        sys.used_memory()
    }

    /// One-minute load average. Zero (or negative) where the platform does
    /// not report one; callers must not assume a positive value.
    pub fn system_load(&self) -> f64 {
        System::load_average().one
    }
}

impl Default for SystemCollector {
    fn default() -> Self {
        Self::new()
    }
}
