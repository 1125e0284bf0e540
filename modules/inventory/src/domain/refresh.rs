//! Fleet-wide refresh orchestration: fire-and-forget per-host sweeps and the
//! deadline-bounded batch load update.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::domain::model::SystemRecord;
use crate::domain::probe::SystemProbe;

/// Which metric a scheduled sweep refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    Memory,
    Load,
}

/// Aggregate completion of one batch load update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub total: usize,
    pub completed: usize,
    /// True when the deadline elapsed before every host signaled. Not an
    /// error: late hosts degrade freshness, not the operation.
    pub deadline_hit: bool,
}

/// Schedule one deferred refresh per record and return immediately.
///
/// Every record gets its own detached task that runs no earlier than `after`
/// from now. Tasks are isolated: one host failing or stalling never cancels
/// or delays another host's task. Failures are logged per host.
pub fn spawn_refresh(
    probe: &Arc<SystemProbe>,
    records: Vec<Arc<SystemRecord>>,
    after: Duration,
    kind: RefreshKind,
) {
    for record in records {
        let probe = Arc::clone(probe);
        tokio::spawn(async move {
            if !after.is_zero() {
                tokio::time::sleep(after).await;
            }
            let result = match kind {
                RefreshKind::Memory => probe.refresh_memory(&record).await,
                RefreshKind::Load => probe
                    .sample_load(&record, Duration::ZERO)
                    .await
                    .map(|load| record.set_system_load(load)),
            };
            if let Err(error) = result {
                tracing::warn!(
                    hostname = %record.hostname(),
                    ?kind,
                    %error,
                    "scheduled refresh failed; keeping last-known value"
                );
            }
        });
    }
}

/// Update the system load of every record, waiting for all hosts or
/// `deadline`, whichever comes first.
///
/// Each host runs as a detached task: wait `after`, fetch the load, write it
/// into the record on success, log on failure — and signal completion either
/// way, so one broken host cannot block the batch. The deadline only stops
/// the wait; in-flight fetches keep running and may still write their record
/// after this returns.
pub async fn update_fleet_load(
    probe: &Arc<SystemProbe>,
    records: Vec<Arc<SystemRecord>>,
    after: Duration,
    deadline: Duration,
) -> BatchOutcome {
    let total = records.len();
    let (done_tx, mut done_rx) = mpsc::channel::<()>(total.max(1));

    for record in records {
        let probe = Arc::clone(probe);
        let done = done_tx.clone();
        tokio::spawn(async move {
            match probe.sample_load(&record, after).await {
                Ok(load) => record.set_system_load(load),
                Err(error) => {
                    tracing::warn!(
                        hostname = %record.hostname(),
                        %error,
                        "load sample failed; keeping last-known value"
                    );
                }
            }
            let _ = done.send(()).await;
        });
    }
    drop(done_tx);

    let mut completed = 0usize;
    let all_done = async {
        while completed < total {
            if done_rx.recv().await.is_none() {
                break;
            }
            completed += 1;
        }
    };
    let deadline_hit = tokio::time::timeout(deadline, all_done).await.is_err();

    if deadline_hit {
        tracing::info!(
            total,
            completed,
            "batch load update hit its deadline; remaining hosts finish in the background"
        );
    }

    BatchOutcome {
        total,
        completed,
        deadline_hit,
    }
}
