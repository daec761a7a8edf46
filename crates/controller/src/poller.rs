//! Status polling loop for a single job.
//!
//! One poller task runs per tracked job. Ticks are handled sequentially,
//! so a query is never issued while the previous one is still in flight.
//! The loop ends when the job reaches a terminal status or its
//! [`CancellationToken`] is triggered.

use std::sync::Arc;
use std::time::Duration;

use profagent_client::JobService;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::state::{publish, LifecyclePhase, ObservableState};

/// Everything the polling loop needs; moved into the job task.
pub(crate) struct Poller {
    pub service: Arc<dyn JobService>,
    pub state_tx: Arc<watch::Sender<ObservableState>>,
    pub job_id: String,
    pub period: Duration,
    pub cancel: CancellationToken,
}

impl Poller {
    /// Poll until the job is terminal or the token is cancelled.
    ///
    /// The first query happens one full period after the poller starts.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(
            job_id = %self.job_id,
            poll_interval_ms = self.period.as_millis() as u64,
            "Polling started",
        );

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::debug!(job_id = %self.job_id, "Polling cancelled");
                    return;
                }
                _ = ticker.tick() => {}
            }

            if !self.poll_once().await {
                return;
            }
        }
    }

    /// One poll cycle. Returns `false` once polling must stop.
    async fn poll_once(&self) -> bool {
        tracing::trace!(job_id = %self.job_id, "Querying job status");

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(job_id = %self.job_id, "Discarding in-flight status query");
                return false;
            }
            result = self.service.query(&self.job_id) => result,
        };

        match result {
            Ok(state) if state.job_id != self.job_id => {
                let message = format!(
                    "Status response for job {} while polling job {}",
                    state.job_id, self.job_id,
                );
                tracing::warn!(job_id = %self.job_id, returned = %state.job_id, "{message}");
                publish(&self.state_tx, &self.cancel, |s| s.error = Some(message))
            }
            Ok(state) => {
                let terminal = state.is_terminal();
                let status = state.status.clone();
                let phase = if terminal {
                    LifecyclePhase::Terminal
                } else {
                    LifecyclePhase::Polling
                };

                let applied = publish(&self.state_tx, &self.cancel, |s| {
                    s.job = Some(state);
                    s.phase = phase;
                });
                if !applied {
                    return false;
                }

                if terminal {
                    tracing::info!(job_id = %self.job_id, status = %status, "Job reached terminal status");
                    return false;
                }
                tracing::debug!(job_id = %self.job_id, status = %status, "Job status updated");
                true
            }
            Err(e) => {
                tracing::warn!(job_id = %self.job_id, error = %e, "Status query failed");
                publish(&self.state_tx, &self.cancel, |s| s.error = Some(e.to_string()))
            }
        }
    }
}
