use async_trait::async_trait;
use profagent_core::job::{JobPayload, JobState};

use crate::api::{JobClient, JobClientError};

/// Remote job service as seen by the lifecycle controller.
///
/// Implementations must not retry or cache: every failure is returned
/// to the caller as-is.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Submit a new job and return its initial snapshot.
    async fn submit(&self, payload: &JobPayload) -> Result<JobState, JobClientError>;

    /// Fetch the latest full snapshot for `job_id`.
    async fn query(&self, job_id: &str) -> Result<JobState, JobClientError>;
}

#[async_trait]
impl JobService for JobClient {
    async fn submit(&self, payload: &JobPayload) -> Result<JobState, JobClientError> {
        self.submit_job(payload).await
    }

    async fn query(&self, job_id: &str) -> Result<JobState, JobClientError> {
        self.job_status(job_id).await
    }
}
