//! Job submission payload and status snapshot types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::artifacts::{ContextRetrieval, CONTEXT_RETRIEVAL};
use crate::config::{DEFAULT_GOAL, DEFAULT_PROFILE_TEXT, DEFAULT_PROJECT_IDEA};
use crate::error::CoreError;
use crate::status::{JobStatus, StepStatus};

/// Parameters submitted to start a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPayload {
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_idea: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_text: Option<String>,
}

impl JobPayload {
    /// Payload with only a goal set.
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            project_idea: None,
            profile_text: None,
        }
    }

    /// Check the fields the remote service requires.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.goal.trim().is_empty() {
            return Err(CoreError::Validation("goal must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for JobPayload {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL.to_string(),
            project_idea: Some(DEFAULT_PROJECT_IDEA.to_string()),
            profile_text: Some(DEFAULT_PROFILE_TEXT.to_string()),
        }
    }
}

/// One unit of work inside a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Unique within the job.
    pub name: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Complete snapshot of a job as reported by the service.
///
/// Every status response carries a full snapshot; consumers replace
/// their copy wholesale instead of merging fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobState {
    pub job_id: String,
    pub status: JobStatus,
    /// Execution order as reported by the service.
    #[serde(default)]
    pub steps: Vec<StepRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Map<String, Value>>,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Look up a step by name.
    pub fn step(&self, name: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Raw artifact bundle by name.
    pub fn artifact(&self, name: &str) -> Option<&Value> {
        self.artifacts.as_ref().and_then(|a| a.get(name))
    }

    /// Decoded context-retrieval bundle, if the job has produced one.
    pub fn context_retrieval(&self) -> Option<Result<ContextRetrieval, CoreError>> {
        self.artifact(CONTEXT_RETRIEVAL)
            .map(ContextRetrieval::from_bundle)
    }
}
