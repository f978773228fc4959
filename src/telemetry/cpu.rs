// Bounded-duration CPU sampling loop

use tokio::time::{Duration, Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::config::PollingConfig;
use crate::models::CpuSample;
use crate::transport::SnmpSession;

#[derive(Debug, Clone)]
pub struct CpuSampler {
    duration: Duration,
    interval: Duration,
    oid: String,
}

impl CpuSampler {
    pub fn new(duration: Duration, interval: Duration, oid: impl Into<String>) -> Self {
        Self {
            duration,
            interval,
            oid: oid.into(),
        }
    }

    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(
            Duration::from_secs(config.duration_secs),
            Duration::from_secs(config.interval_secs),
            config.cpu_oid.clone(),
        )
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub async fn sample(
        &self,
        session: &dyn SnmpSession,
        cancel: &CancellationToken,
    ) -> Vec<CpuSample> {
        self.sample_with(session, cancel, |_| {}).await
    }

    /// Reads one value every `interval` until `duration` has elapsed or `cancel` fires.
    /// No sample is taken at or after the window boundary. A failed or unparsable
    /// read records 0 and the loop goes on. `on_sample` sees each sample as it is taken.
    #[instrument(
        level = "debug",
        skip_all,
        fields(duration_secs = self.duration.as_secs(), interval_secs = self.interval.as_secs())
    )]
    pub async fn sample_with<F>(
        &self,
        session: &dyn SnmpSession,
        cancel: &CancellationToken,
        mut on_sample: F,
    ) -> Vec<CpuSample>
    where
        F: FnMut(&CpuSample),
    {
        let start = Instant::now();
        let mut samples = Vec::new();
        loop {
            let elapsed = start.elapsed();
            if elapsed >= self.duration || cancel.is_cancelled() {
                break;
            }

            let percent = match session.get(&self.oid).await {
                Ok(raw) => parse_percent(&raw),
                Err(e) => {
                    tracing::warn!(error = %e, operation = "cpu_read", "CPU read failed; recording 0");
                    0
                }
            };
            let sample = CpuSample::new(elapsed.as_secs(), percent);
            on_sample(&sample);
            samples.push(sample);

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = cancel.cancelled() => {
                    tracing::info!(samples = samples.len(), "CPU sampling cancelled");
                    break;
                }
            }
        }
        samples
    }
}

/// `"42%"`, `" 17 "`, `"3.9"` -> 42, 17, 3. Anything unparsable -> 0.
pub fn parse_percent(raw: &str) -> i64 {
    let cleaned = raw.replace('%', "");
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}
