//! Category weight table for RIM scoring.

use scholarpulse_common::{Result, ScholarPulseError};
use serde::{Deserialize, Serialize};

/// The 7-category weight table. Weights must sum to 1.0; the sum is
/// validated at startup and a mismatch is a fatal configuration error,
/// never silently renormalised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightTable {
    /// Citations-per-year (log-saturated)
    #[serde(default = "default_citations")]
    pub citations: f64,
    /// Journal quality (placeholder signal)
    #[serde(default = "default_journal_quality")]
    pub journal_quality: f64,
    /// Data availability (open-access status)
    #[serde(default = "default_data_availability")]
    pub data_availability: f64,
    /// Relevance. Category label kept from the scoring model; its sole
    /// current input is the retraction signal.
    #[serde(default = "default_relevance")]
    pub relevance: f64,
    /// Funding transparency (funder metadata present)
    #[serde(default = "default_funding")]
    pub funding: f64,
    /// Author affiliation completeness
    #[serde(default = "default_author_completeness")]
    pub author_completeness: f64,
    /// Peer review (placeholder signal)
    #[serde(default = "default_peer_review")]
    pub peer_review: f64,
}

fn default_citations() -> f64 { 0.25 }
fn default_journal_quality() -> f64 { 0.20 }
fn default_data_availability() -> f64 { 0.15 }
fn default_relevance() -> f64 { 0.20 }
fn default_funding() -> f64 { 0.10 }
fn default_author_completeness() -> f64 { 0.05 }
fn default_peer_review() -> f64 { 0.05 }

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            citations: default_citations(),
            journal_quality: default_journal_quality(),
            data_availability: default_data_availability(),
            relevance: default_relevance(),
            funding: default_funding(),
            author_completeness: default_author_completeness(),
            peer_review: default_peer_review(),
        }
    }
}

impl WeightTable {
    pub fn sum(&self) -> f64 {
        self.citations
            + self.journal_quality
            + self.data_availability
            + self.relevance
            + self.funding
            + self.author_completeness
            + self.peer_review
    }

    /// Validate that the weights sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ScholarPulseError::Config(format!(
                "weight table must sum to 1.0, got {sum:.6}"
            )));
        }
        Ok(())
    }

    /// Load a weight policy from a TOML file and validate it.
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScholarPulseError::Config(format!("cannot read weight file {}: {e}", path.display()))
        })?;
        let table: Self = toml::from_str(&content)
            .map_err(|e| ScholarPulseError::Config(format!("malformed weight file: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Weights in category order matching `SubScores::as_array`.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.citations,
            self.journal_quality,
            self.data_availability,
            self.relevance,
            self.funding,
            self.author_completeness,
            self.peer_review,
        ]
    }
}
