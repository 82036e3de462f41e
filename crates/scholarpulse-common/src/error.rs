use thiserror::Error;

/// Error taxonomy for a scholar analysis run.
///
/// `NotFound`, `SourceUnavailable`, `Timeout`, and `Config` are fatal to the
/// run and surfaced to the caller. `EnrichmentUnavailable` is recovered
/// locally: the affected field degrades to its unknown state and the run
/// continues.
#[derive(Debug, Error)]
pub enum ScholarPulseError {
    #[error("scholar not found: no publications resolvable for '{0}'")]
    NotFound(String),

    #[error("source unavailable: {source_name}: {message}")]
    SourceUnavailable { source_name: String, message: String },

    #[error("enrichment unavailable: {source_name}: {message}")]
    EnrichmentUnavailable { source_name: String, message: String },

    #[error("analysis timed out after {0} ms")]
    Timeout(u64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network capability error: {0}")]
    Sandbox(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("export error: {0}")]
    Export(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ScholarPulseError>;
