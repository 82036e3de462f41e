//! The final, immutable analysis report.

use serde::{Deserialize, Serialize};

use scholarpulse_enrichment::TriState;
use scholarpulse_scorer::{RimBand, ScoredPublication, WeightTable};

/// One scholar analysis result. Created fresh per `analyze` invocation,
/// never mutated after assembly. Contains no timestamps or run identifiers:
/// identical collaborator responses produce an identical report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarReport {
    pub scholar_id: String,
    pub scholar_name: Option<String>,
    pub current_year: i32,
    pub weights: WeightTable,
    /// Selected publications, ordered by citation count descending
    /// (year descending, then fetch order, on ties).
    pub publications: Vec<ScoredPublication>,
    /// Mean of per-publication RIM totals. The publication list is
    /// guaranteed non-empty (an empty profile fails with `NotFound`).
    pub aggregate_rim: f64,
    pub aggregate_band: RimBand,
    /// Publications with at least one field left at an unknown default.
    pub degraded_publications: usize,
    /// Total unknown fields across all publications.
    pub unknown_fields: usize,
    /// Enrichment lookups that errored out across all publications.
    pub enrichment_failures: usize,
}

impl ScholarReport {
    pub fn total_citations(&self) -> u64 {
        self.publications
            .iter()
            .filter_map(|p| p.record.citation_count)
            .sum()
    }

    /// Share of publications confirmed open access, in [0, 1].
    pub fn open_access_share(&self) -> f64 {
        if self.publications.is_empty() {
            return 0.0;
        }
        let oa = self
            .publications
            .iter()
            .filter(|p| p.record.is_open_access == TriState::Yes)
            .count();
        oa as f64 / self.publications.len() as f64
    }
}
