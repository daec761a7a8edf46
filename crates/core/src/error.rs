#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed artifact '{name}': {source}")]
    MalformedArtifact {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
