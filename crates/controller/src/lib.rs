//! Job lifecycle controller.
//!
//! [`JobController`] owns one job at a time: it submits the payload,
//! polls the job's status on a fixed cadence, publishes every snapshot
//! through a [`tokio::sync::watch`] channel, and stops polling once the
//! job reaches a terminal status or the controller is torn down.

pub mod config;
pub mod controller;
mod poller;
pub mod state;

pub use config::ControllerConfig;
pub use controller::JobController;
pub use state::{LifecyclePhase, ObservableState};
