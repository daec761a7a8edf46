//! Typed views over the result bundles a job publishes.
//!
//! Bundles travel inside [`JobState::artifacts`](crate::job::JobState) as
//! raw JSON so unknown bundles survive a snapshot unchanged. This module
//! decodes the ones the client knows how to display.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Artifact key of the context-retrieval bundle.
pub const CONTEXT_RETRIEVAL: &str = "context_retrieval";

/// One retrieved document, in relevance-rank order within its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Document metadata; carries at least `doc_id`.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Relevance score. No fixed bound.
    pub score: f64,
    /// Display text.
    #[serde(default)]
    pub snippet: String,
}

impl ResultItem {
    /// The document identifier from the metadata, if present.
    pub fn doc_id(&self) -> Option<&str> {
        self.metadata.get("doc_id").and_then(Value::as_str)
    }
}

/// The categories the context-retrieval step produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextResults {
    #[serde(default)]
    pub faculty: Vec<ResultItem>,
    #[serde(default)]
    pub grants: Vec<ResultItem>,
}

/// Decoded `context_retrieval` bundle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextRetrieval {
    /// Query the service searched with, when reported.
    pub query: Option<String>,
    /// Per-category result limit the service applied, when reported.
    pub top_k: Option<u32>,
    pub results: ContextResults,
}

/// Wire shape: categories either at the top level or nested under
/// `results` next to `query` and `top_k`.
#[derive(Deserialize)]
struct RawContextRetrieval {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    top_k: Option<u32>,
    #[serde(default)]
    results: Option<ContextResults>,
    #[serde(default)]
    faculty: Vec<ResultItem>,
    #[serde(default)]
    grants: Vec<ResultItem>,
}

impl ContextRetrieval {
    /// Decode a raw `context_retrieval` bundle.
    pub fn from_bundle(bundle: &Value) -> Result<Self, CoreError> {
        let raw = RawContextRetrieval::deserialize(bundle).map_err(|source| {
            CoreError::MalformedArtifact {
                name: CONTEXT_RETRIEVAL,
                source,
            }
        })?;

        let results = raw.results.unwrap_or(ContextResults {
            faculty: raw.faculty,
            grants: raw.grants,
        });

        Ok(Self {
            query: raw.query,
            top_k: raw.top_k,
            results,
        })
    }
}
