// Serve-mode refresh worker: runs poll cycles on a fixed cadence,
// streams CPU samples to /ws/cpu while sampling, and keeps the latest snapshot for /api.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tokio::time::{Duration, interval};
use tokio_util::sync::CancellationToken;

use crate::config::OutputConfig;
use crate::models::CpuSample;
use crate::report;
use crate::telemetry::{PollSnapshot, Poller};

/// Latest completed poll cycle, `None` until the first one finishes.
pub type SharedSnapshot = Arc<RwLock<Option<PollSnapshot>>>;

/// Poller, shared state, sample channel, and shutdown for the worker.
pub struct WorkerDeps {
    pub poller: Arc<Poller>,
    pub latest: SharedSnapshot,
    pub cpu_tx: broadcast::Sender<CpuSample>,
    pub cancel: CancellationToken,
}

pub struct WorkerConfig {
    /// Time between the starts of consecutive cycles (a cycle includes the CPU window).
    pub refresh_secs: u64,
    /// Write report and graph files after each cycle when set.
    pub output: Option<OutputConfig>,
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        poller,
        latest,
        cpu_tx,
        cancel,
    } = deps;
    let WorkerConfig {
        refresh_secs,
        output,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(refresh_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut cycles_total: u64 = 0;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let snapshot = poller
                        .cycle(&cancel, |sample| {
                            // Err only means no /ws/cpu client is connected.
                            let _ = cpu_tx.send(*sample);
                        })
                        .await;
                    if cancel.is_cancelled() {
                        tracing::debug!("Cycle interrupted by shutdown; keeping previous snapshot");
                        break;
                    }

                    if let Some(output) = &output
                        && let Err(e) = report::write_artifacts(&snapshot, output)
                    {
                        tracing::warn!(error = %e, operation = "write_artifacts", "Failed to write poll artifacts");
                    }

                    cycles_total += 1;
                    tracing::info!(
                        cycles_total,
                        devices = snapshot.report.len(),
                        cpu_samples = snapshot.cpu.len(),
                        "poll cycle complete"
                    );
                    *latest.write().await = Some(snapshot);
                }
                _ = cancel.cancelled() => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
            }
        }
    })
}
