use std::time::Duration;

use profagent_core::config::DEFAULT_POLL_INTERVAL_MS;

/// Tunable parameters for the lifecycle controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Fixed period between status queries while a job is running.
    pub poll_interval: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_polls_every_second() {
        assert_eq!(ControllerConfig::default().poll_interval, Duration::from_secs(1));
    }
}
