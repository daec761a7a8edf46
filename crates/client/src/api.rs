//! HTTP client for the agentic workflow endpoints.
//!
//! Wraps job submission (`POST /api/agentic_workflow_async`) and status
//! lookup (`GET /api/agentic_workflow_status/{job_id}`). No retries and
//! no caching: every failure is returned to the caller immediately.

use std::time::Duration;

use profagent_core::job::{JobPayload, JobState};

/// Path of the job submission endpoint.
pub const SUBMIT_PATH: &str = "/api/agentic_workflow_async";

/// Path prefix of the job status endpoint; the job id is appended.
pub const STATUS_PATH: &str = "/api/agentic_workflow_status";

/// HTTP client for a single workflow service.
#[derive(Debug, Clone)]
pub struct JobClient {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the workflow REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum JobClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Job service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not a valid job snapshot.
    #[error("Malformed job response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The configured base URL cannot address the status endpoint.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

impl JobClientError {
    /// HTTP status of a rejected request, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Malformed(_) | Self::InvalidUrl(_) => None,
        }
    }
}

impl JobClient {
    /// Create a new client for a workflow service.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, JobClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Base HTTP URL requests are sent to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Submit a job.
    ///
    /// Sends the payload as the JSON body and returns the initial
    /// snapshot, which always carries the service-assigned `job_id`.
    pub async fn submit_job(&self, payload: &JobPayload) -> Result<JobState, JobClientError> {
        let response = self
            .client
            .post(format!("{}{SUBMIT_PATH}", self.api_url))
            .json(payload)
            .send()
            .await?;

        let state: JobState = Self::parse_response(response).await?;
        tracing::debug!(
            job_id = %state.job_id,
            status = %state.status,
            "Job submitted",
        );
        Ok(state)
    }

    /// Retrieve the latest full snapshot of a job.
    pub async fn job_status(&self, job_id: &str) -> Result<JobState, JobClientError> {
        let response = self
            .client
            .get(self.status_url(job_id)?)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Status endpoint for `job_id`, with the id percent-encoded as a
    /// single path segment.
    fn status_url(&self, job_id: &str) -> Result<reqwest::Url, JobClientError> {
        let base = format!("{}{STATUS_PATH}", self.api_url);
        let mut url = reqwest::Url::parse(&base)
            .map_err(|e| JobClientError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| JobClientError::InvalidUrl(base.clone()))?
            .push(job_id);
        Ok(url)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`JobClientError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, JobClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(JobClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// The body is read first so that a transport failure and an
    /// unparseable body surface as different errors.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, JobClientError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
