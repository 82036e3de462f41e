//! Per-publication RIM score computation.
//!
//! RIM = Σ(weight_i × sub_score_i) × 100, one weighted sum over the seven
//! category sub-scores, reported to one decimal place.

use serde::{Deserialize, Serialize};

use scholarpulse_enrichment::FeatureRecord;

use crate::normalise::{
    affiliation_score, citation_score, citations_per_year, funding_score, journal_quality_score,
    open_access_score, peer_review_score, retraction_penalty_score,
};
use crate::weights::WeightTable;

/// The seven category sub-scores, all in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub citations: f64,
    pub journal_quality: f64,
    pub data_availability: f64,
    pub relevance: f64,
    pub funding: f64,
    pub author_completeness: f64,
    pub peer_review: f64,
}

impl SubScores {
    /// Category order matching `WeightTable::as_array`.
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

/// Qualitative band for a RIM score, used by display and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RimBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl RimBand {
    pub fn from_score(rim: f64) -> Self {
        if rim >= 80.0 {
            RimBand::Excellent
        } else if rim >= 60.0 {
            RimBand::Good
        } else if rim >= 40.0 {
            RimBand::Fair
        } else {
            RimBand::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RimBand::Excellent => "Excellent",
            RimBand::Good => "Good",
            RimBand::Fair => "Fair",
            RimBand::Poor => "Poor",
        }
    }
}

/// A publication with its sub-scores and weighted total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPublication {
    pub record: FeatureRecord,
    pub citations_per_year: f64,
    pub sub_scores: SubScores,
    /// Weighted total in [0, 100], one decimal place.
    pub rim_score: f64,
    /// `1 − RIM/100`, clipped to [0, 1].
    pub risk_factor: f64,
    pub band: RimBand,
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Score one feature record against a weight table.
///
/// The caller is responsible for having validated the weight table; this
/// function is pure and total over its inputs.
pub fn score_publication(
    record: FeatureRecord,
    weights: &WeightTable,
    current_year: i32,
) -> ScoredPublication {
    let sub_scores = SubScores {
        citations: citation_score(record.citation_count, record.year, current_year),
        journal_quality: journal_quality_score(),
        data_availability: open_access_score(record.is_open_access),
        // "Relevance" is the category label; its sole current input is the
        // retraction signal.
        relevance: retraction_penalty_score(record.is_retracted),
        funding: funding_score(record.has_funding_info),
        author_completeness: affiliation_score(record.affiliation_quality),
        peer_review: peer_review_score(),
    };

    let weighted_sum: f64 = sub_scores
        .as_array()
        .iter()
        .zip(weights.as_array().iter())
        .map(|(s, w)| s * w)
        .sum();

    let rim_score = round_to(weighted_sum * 100.0, 1);

    ScoredPublication {
        citations_per_year: round_to(
            citations_per_year(record.citation_count, record.year, current_year),
            3,
        ),
        sub_scores,
        rim_score,
        risk_factor: round_to((1.0 - rim_score / 100.0).clamp(0.0, 1.0), 3),
        band: RimBand::from_score(rim_score),
        record,
    }
}

/// Scholar-level aggregate: the arithmetic mean of per-publication totals,
/// one decimal place. An empty set has no aggregate and returns `None`.
pub fn aggregate_rim(scored: &[ScoredPublication]) -> Option<f64> {
    if scored.is_empty() {
        return None;
    }
    let sum: f64 = scored.iter().map(|s| s.rim_score).sum();
    Some(round_to(sum / scored.len() as f64, 1))
}
