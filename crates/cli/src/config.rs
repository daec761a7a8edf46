use std::time::Duration;

use profagent_core::config::{DEFAULT_POLL_INTERVAL_MS, MAX_CONTEXT_RESULTS};
use profagent_core::job::JobPayload;

/// Default base URL of the workflow service.
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// CLI configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local workflow service.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Base URL of the workflow service.
    pub api_url: String,
    /// Period between status queries.
    pub poll_interval: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Result items shown per artifact category.
    pub max_context_results: usize,
    /// Payload submitted on start.
    pub payload: JobPayload,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `AGENT_API_URL`        | `http://localhost:8000`    |
    /// | `POLL_INTERVAL_MS`     | `1000`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_CONTEXT_RESULTS`  | `5`                        |
    /// | `AGENT_GOAL`           | built-in default goal      |
    /// | `AGENT_PROJECT_IDEA`   | built-in default idea      |
    /// | `AGENT_PROFILE_TEXT`   | built-in default profile   |
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        let api_url = lookup("AGENT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let poll_interval =
            Duration::from_millis(number("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS).max(1));
        let request_timeout =
            Duration::from_secs(number("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS));
        let max_context_results =
            number("MAX_CONTEXT_RESULTS", MAX_CONTEXT_RESULTS as u64) as usize;

        let defaults = JobPayload::default();
        let payload = JobPayload {
            goal: lookup("AGENT_GOAL").unwrap_or(defaults.goal),
            project_idea: lookup("AGENT_PROJECT_IDEA").or(defaults.project_idea),
            profile_text: lookup("AGENT_PROFILE_TEXT").or(defaults.profile_text),
        };

        Self {
            api_url,
            poll_interval,
            request_timeout,
            max_context_results,
            payload,
        }
    }
}
