use serde::{Deserialize, Serialize};

/// Configuration for the inventory module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryConfig {
    /// Enable/disable the inventory module
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Port the remote system endpoints listen on
    #[serde(default = "default_client_port")]
    pub client_port: u16,

    /// Total per-request timeout for metric fetches, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout for metric fetches, in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_client_port() -> u16 {
    9080
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            client_port: default_client_port(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
