//! State the controller exposes to observers.

use profagent_core::job::JobState;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Where the controller is in a job's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    /// No active job: initial state, or a submission failed.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// A non-terminal job is held and the poll timer is armed.
    Polling,
    /// A terminal job is held; no timer is armed.
    Terminal,
}

/// Snapshot published to observers on every change.
///
/// `job` is always a complete snapshot from the service, never a
/// field-level merge. `error` carries the most recent failure and does
/// not hide the last known `job`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservableState {
    pub job: Option<JobState>,
    pub error: Option<String>,
    pub phase: LifecyclePhase,
}

/// Apply `update` to the published state unless `token` has been
/// cancelled.
///
/// The cancellation check runs under the channel's write lock, so a
/// job superseded by a newer `start` (or by teardown) can never
/// overwrite state published after it was cancelled. Returns whether the
/// update was applied.
pub(crate) fn publish(
    state_tx: &watch::Sender<ObservableState>,
    token: &CancellationToken,
    update: impl FnOnce(&mut ObservableState),
) -> bool {
    state_tx.send_if_modified(|state| {
        if token.is_cancelled() {
            return false;
        }
        update(state);
        true
    })
}
