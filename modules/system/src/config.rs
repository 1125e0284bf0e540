use serde::{Deserialize, Serialize};

/// Configuration for the system endpoint module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// Enable/disable the system endpoint module
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}
