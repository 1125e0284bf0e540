use serde::{Deserialize, Serialize};

use crate::domain::model::RecordSnapshot;
use crate::domain::refresh::BatchOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemDto {
    pub hostname: String,
    pub os_name: String,
    pub runtime_version: String,
    pub heap_size: u64,
    pub memory_usage: f64,
    pub system_load: f64,
}

impl From<RecordSnapshot> for SystemDto {
    fn from(snapshot: RecordSnapshot) -> Self {
        Self {
            hostname: snapshot.hostname,
            os_name: snapshot.os_name,
            runtime_version: snapshot.runtime_version,
            heap_size: snapshot.heap_size,
            memory_usage: snapshot.memory_usage,
            system_load: snapshot.system_load,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcomeDto {
    pub total: usize,
    pub completed: usize,
    pub deadline_hit: bool,
}

impl From<BatchOutcome> for BatchOutcomeDto {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            total: outcome.total,
            completed: outcome.completed,
            deadline_hit: outcome.deadline_hit,
        }
    }
}

/// Success envelope for mutating operations, `{"ok": "..."}`.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub ok: String,
}

impl StatusBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { ok: message.into() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterQuery {
    pub hostname: String,
    pub os_name: String,
    pub runtime_version: String,
    pub heap_size: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuery {
    pub os_name: String,
    pub runtime_version: String,
    pub heap_size: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepQuery {
    /// Settle time before each host is sampled, in seconds
    #[serde(default)]
    pub after_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchLoadQuery {
    /// Settle time before each host is sampled, in seconds
    #[serde(default)]
    pub after_secs: u64,
    /// Upper bound on how long the batch waits for completions, in seconds
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

fn default_deadline_secs() -> u64 {
    30
}
