//! Plain-text rendering of the controller's observable state.
//!
//! Rendering is a pure function of [`ObservableState`]: the dashboard
//! never reads anything else from the controller.

use profagent_controller::{LifecyclePhase, ObservableState};
use profagent_core::artifacts::{ContextRetrieval, ResultItem};
use profagent_core::job::{JobState, StepRecord};

/// Render the full dashboard: controller error, then the job.
pub fn render_state(state: &ObservableState, max_results: usize) -> String {
    let mut lines = Vec::new();

    if let Some(error) = &state.error {
        lines.push(format!("Error: {error}"));
    }

    match (&state.job, state.phase) {
        (None, LifecyclePhase::Submitting) => lines.push("Submitting job...".to_string()),
        (None, _) => {}
        (Some(job), _) => {
            lines.extend(status_lines(job));
            lines.extend(step_lines(&job.steps));
            match job.context_retrieval() {
                Some(Ok(context)) => lines.extend(context_lines(&context, max_results)),
                Some(Err(e)) => {
                    lines.push("Context Retrieval".to_string());
                    lines.push(format!("  (unreadable: {e})"));
                }
                None => {}
            }
        }
    }

    lines.join("\n")
}

/// Job id, status, and job-level error.
pub fn render_status(job: &JobState) -> String {
    status_lines(job).join("\n")
}

/// Steps in reported order.
pub fn render_steps(steps: &[StepRecord]) -> String {
    step_lines(steps).join("\n")
}

/// Faculty and grant results, at most `max_results` per category.
pub fn render_context(context: &ContextRetrieval, max_results: usize) -> String {
    context_lines(context, max_results).join("\n")
}

fn status_lines(job: &JobState) -> Vec<String> {
    let mut lines = vec![
        "Status".to_string(),
        format!("  Job ID: {}", job.job_id),
        format!("  Status: {}", job.status),
    ];
    if let Some(error) = &job.error {
        lines.push(format!("  Error: {error}"));
    }
    lines
}

fn step_lines(steps: &[StepRecord]) -> Vec<String> {
    let mut lines = vec!["Steps".to_string()];
    for step in steps {
        let mut line = format!("  - {} - {}", step.name, step.status);
        if let Some(message) = &step.message {
            line.push_str(&format!(" ({message})"));
        }
        lines.push(line);
    }
    lines
}

fn context_lines(context: &ContextRetrieval, max_results: usize) -> Vec<String> {
    let mut lines = vec!["Context Retrieval".to_string()];
    lines.extend(category_lines("Faculty", &context.results.faculty, max_results));
    lines.extend(category_lines("Grants", &context.results.grants, max_results));
    lines
}

fn category_lines(title: &str, items: &[ResultItem], max_results: usize) -> Vec<String> {
    let mut lines = vec![format!("  {title}")];
    if items.is_empty() {
        lines.push("    (none)".to_string());
        return lines;
    }
    for (rank, item) in items.iter().take(max_results).enumerate() {
        let doc_id = item.doc_id().unwrap_or("<unknown>");
        lines.push(format!("    {}. {doc_id} (score: {})", rank + 1, item.score));
        if !item.snippet.is_empty() {
            lines.push(format!("       {}", item.snippet));
        }
    }
    lines
}
