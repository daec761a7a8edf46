//! Shared defaults for the Professor Agent job workflow.
//!
//! The core crates never read the environment; binaries may override
//! these values from their own configuration layer.

/// Display name used in headers and log banners.
pub const APP_NAME: &str = "Professor Agent";

/// How often the controller polls job status, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Maximum number of result items shown per artifact category.
pub const MAX_CONTEXT_RESULTS: usize = 5;

/// Default research goal submitted when the user supplies none.
pub const DEFAULT_GOAL: &str = "Hospital readmission prediction using ML";

/// Default project idea submitted when the user supplies none.
pub const DEFAULT_PROJECT_IDEA: &str = "Predict 30-day readmission using structured EHR data";

/// Default profile description submitted when the user supplies none.
pub const DEFAULT_PROFILE_TEXT: &str = "MS Data Analytics student focusing on ML systems";
