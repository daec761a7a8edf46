//! The job lifecycle state machine.
//!
//! ```text
//! Idle/Terminal --start--> Submitting --ok, running--> Polling --terminal--> Terminal
//!                               |                        |  ^
//!                               +--err--> Idle           +--+ tick (ok or err)
//! ```
//!
//! `start` while Submitting or Polling abandons the previous job first.
//! Teardown (explicit [`JobController::shutdown`] or drop) cancels the
//! master token, which stops every poller and discards in-flight results.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use profagent_client::JobService;
use profagent_core::job::{JobPayload, JobState};
use tokio::sync::{oneshot, watch};
use tokio_util::sync::CancellationToken;

use crate::config::ControllerConfig;
use crate::poller::Poller;
use crate::state::{publish, LifecyclePhase, ObservableState};

/// Lower bound on the poll period; a zero period cannot arm a timer.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Owns one job's lifecycle from submission through termination.
///
/// Observers read state through [`subscribe`](Self::subscribe) or
/// [`state`](Self::state); only the controller writes it.
pub struct JobController {
    service: Arc<dyn JobService>,
    config: ControllerConfig,
    state_tx: Arc<watch::Sender<ObservableState>>,
    /// Master token, cancelled on teardown.
    cancel: CancellationToken,
    /// Token of the job currently tracked (child of `cancel`).
    active: Mutex<CancellationToken>,
}

impl JobController {
    pub fn new(service: Arc<dyn JobService>, config: ControllerConfig) -> Self {
        let (state_tx, _) = watch::channel(ObservableState::default());
        let cancel = CancellationToken::new();
        let active = Mutex::new(cancel.child_token());

        Self {
            service,
            config,
            state_tx: Arc::new(state_tx),
            cancel,
            active,
        }
    }

    /// Receive every published state change.
    pub fn subscribe(&self) -> watch::Receiver<ObservableState> {
        self.state_tx.subscribe()
    }

    /// Copy of the current observable state.
    pub fn state(&self) -> ObservableState {
        self.state_tx.borrow().clone()
    }

    /// Current job snapshot, if any.
    pub fn job(&self) -> Option<JobState> {
        self.state_tx.borrow().job.clone()
    }

    /// Most recent error message, if any.
    pub fn error(&self) -> Option<String> {
        self.state_tx.borrow().error.clone()
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.state_tx.borrow().phase
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Start a new job, replacing whatever job was tracked before.
    ///
    /// Never fails: a rejected submission is published as the
    /// observable error and the controller returns to Idle. Resolves once
    /// the submission has settled (or was superseded). The submission and
    /// the polling that follows run in a task owned by the job's token, so
    /// dropping this future does not leave the job half-submitted.
    pub async fn start(&self, payload: JobPayload) {
        if self.is_shut_down() {
            tracing::warn!("Ignoring start on a controller that was shut down");
            return;
        }

        let job_cancel = self.replace_active_job();

        publish(&self.state_tx, &job_cancel, |s| {
            *s = ObservableState {
                job: None,
                error: None,
                phase: LifecyclePhase::Submitting,
            };
        });

        tracing::info!(goal = %payload.goal, "Submitting job");

        let (settled_tx, settled_rx) = oneshot::channel();
        let task = JobTask {
            service: Arc::clone(&self.service),
            state_tx: Arc::clone(&self.state_tx),
            payload,
            period: self.config.poll_interval.max(MIN_POLL_INTERVAL),
            cancel: job_cancel,
        };
        tokio::spawn(task.run(settled_tx));

        // A dropped sender means the job was superseded before settling.
        let _ = settled_rx.await;
    }

    /// Tear the controller down.
    ///
    /// Synchronously disarms the poll timer; no query is issued after
    /// this returns and any in-flight result is discarded. Published
    /// state is left as it was.
    pub fn shutdown(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        tracing::info!("Shutting down job controller");
        self.cancel.cancel();
    }

    // ---- private helpers ----

    /// Cancel the tracked job's token and install a fresh one.
    fn replace_active_job(&self) -> CancellationToken {
        let token = self.cancel.child_token();
        let previous = std::mem::replace(&mut *self.lock_active(), token.clone());
        previous.cancel();
        token
    }

    fn lock_active(&self) -> MutexGuard<'_, CancellationToken> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Submission followed by polling for one job.
struct JobTask {
    service: Arc<dyn JobService>,
    state_tx: Arc<watch::Sender<ObservableState>>,
    payload: JobPayload,
    period: Duration,
    cancel: CancellationToken,
}

impl JobTask {
    /// Submit, publish the outcome, signal `settled`, then poll while the
    /// job is non-terminal.
    async fn run(self, settled: oneshot::Sender<()>) {
        let submitted = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!("Submission superseded before it settled");
                return;
            }
            result = self.service.submit(&self.payload) => result,
        };

        let state = match submitted {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "Job submission failed");
                publish(&self.state_tx, &self.cancel, |s| {
                    s.error = Some(e.to_string());
                    s.phase = LifecyclePhase::Idle;
                });
                let _ = settled.send(());
                return;
            }
        };

        let job_id = state.job_id.clone();
        let terminal = state.is_terminal();
        let phase = if terminal {
            LifecyclePhase::Terminal
        } else {
            LifecyclePhase::Polling
        };

        tracing::info!(job_id = %job_id, status = %state.status, "Job accepted");

        let applied = publish(&self.state_tx, &self.cancel, |s| {
            s.job = Some(state);
            s.phase = phase;
        });
        let _ = settled.send(());
        if !applied || terminal {
            return;
        }

        Poller {
            service: self.service,
            state_tx: self.state_tx,
            job_id,
            period: self.period,
            cancel: self.cancel,
        }
        .run()
        .await;
    }
}

impl Drop for JobController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
