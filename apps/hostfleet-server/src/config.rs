use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use inventory_module::InventoryConfig;
use system_module::SystemConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:9080".to_owned()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// tracing env-filter directive, e.g. `info` or `hostfleet=debug,info`
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    /// Layered load: defaults -> YAML (if provided) -> env (`HOSTFLEET__*`,
    /// nested keys separated by `__`).
    ///
    /// # Errors
    /// Returns an error when the file or environment carry values that do
    /// not fit the schema.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed("HOSTFLEET__").split("__"))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9080");
        assert!(config.inventory.enabled);
        assert!(config.system.enabled);
        assert_eq!(config.inventory.client_port, 9080);
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "server:\n  bind_addr: 0.0.0.0:8123\ninventory:\n  client_port: 8124\nsystem:\n  enabled: false"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8123");
        assert_eq!(config.inventory.client_port, 8124);
        assert!(!config.system.enabled);
        // untouched sections keep their defaults
        assert_eq!(config.inventory.request_timeout_secs, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "server:\n  bind_address: 0.0.0.0:8123").unwrap();
        assert!(AppConfig::load(Some(file.path())).is_err());
    }
}
