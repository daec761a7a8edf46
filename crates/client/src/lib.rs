//! REST client for the agentic workflow service.
//!
//! [`JobClient`] wraps the submission and status endpoints using
//! [`reqwest`]. The [`JobService`] trait is the seam the lifecycle
//! controller depends on, so it can be driven by a scripted service in
//! tests.

pub mod api;
pub mod service;

pub use api::{JobClient, JobClientError};
pub use service::JobService;
