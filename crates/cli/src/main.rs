//! `profagent` -- terminal dashboard for the agentic workflow service.
//!
//! Submits one job, re-renders its status, steps, and retrieved context
//! on every change, and exits once the job is finished. Ctrl-C tears
//! the controller down and exits.
//!
//! The first positional argument, if given, replaces the configured
//! goal. See [`CliConfig::from_env`] for environment variables.

use std::sync::Arc;

use anyhow::Context;
use profagent_cli::config::CliConfig;
use profagent_cli::render;
use profagent_client::JobClient;
use profagent_controller::{ControllerConfig, JobController, LifecyclePhase, ObservableState};
use profagent_core::config::APP_NAME;
use profagent_core::status::JobStatus;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Used when `RUST_LOG` is unset. `profagent` is this binary's own target.
const DEFAULT_LOG_FILTER: &str =
    "profagent=info,profagent_cli=info,profagent_client=info,profagent_controller=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = CliConfig::from_env();
    if let Some(goal) = std::env::args().nth(1) {
        config.payload.goal = goal;
    }
    config.payload.validate()?;

    tracing::info!(
        app = APP_NAME,
        api_url = %config.api_url,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        "Starting dashboard",
    );

    let client = JobClient::with_timeout(config.api_url.clone(), config.request_timeout)
        .context("Failed to build HTTP client")?;
    let controller = JobController::new(
        Arc::new(client),
        ControllerConfig {
            poll_interval: config.poll_interval,
        },
    );
    let mut rx = controller.subscribe();

    tokio::select! {
        _ = controller.start(config.payload.clone()) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted during submission, stopping");
            controller.shutdown();
            anyhow::bail!("Interrupted before the job was accepted");
        }
    }

    let final_state = loop {
        let state = rx.borrow_and_update().clone();
        println!("{}\n", render::render_state(&state, config.max_context_results));

        if is_finished(&state) {
            break state;
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break state;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping");
                controller.shutdown();
                break state;
            }
        }
    };

    match final_state.job {
        Some(job) if job.status == JobStatus::Done => Ok(()),
        Some(job) => anyhow::bail!("Job {} ended with status {}", job.job_id, job.status),
        None => anyhow::bail!(
            "Job did not start: {}",
            final_state.error.as_deref().unwrap_or("interrupted")
        ),
    }
}

/// Nothing more will change: the job is terminal or never started.
fn is_finished(state: &ObservableState) -> bool {
    match state.phase {
        LifecyclePhase::Terminal => true,
        LifecyclePhase::Idle => state.error.is_some(),
        LifecyclePhase::Submitting | LifecyclePhase::Polling => false,
    }
}
