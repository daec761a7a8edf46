//! Shared domain types for the Professor Agent job workflow.
//!
//! Defines the submission payload, job snapshots, status vocabularies,
//! result artifacts, and the defaults shared by the client, the
//! lifecycle controller, and the presentation layer.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod job;
pub mod status;
