//! Signal normalisation functions.
//!
//! All functions here are pure, deterministic, and total: they never fail
//! and never consult external state. Each maps one raw signal to a [0, 1]
//! sub-score.

use scholarpulse_enrichment::TriState;

/// Citations-per-year rate treated as "excellent": the log normalisation
/// saturates at this rate. A policy constant, not derived from data; 20
/// citations/year keeps a well-cited 5-year-old paper (100 citations) at the
/// top of the scale.
pub const CITATION_SATURATION_CPY: f64 = 20.0;

/// Citations per year over the publication's lifetime.
///
/// Gap is `max(1, current_year − publication_year)`, so a paper published
/// this year (or with a future year from dirty data) divides by one. An
/// unknown year yields 0.0 — without an age there is no rate.
pub fn citations_per_year(
    citation_count: Option<u64>,
    publication_year: Option<i32>,
    current_year: i32,
) -> f64 {
    let (Some(count), Some(year)) = (citation_count, publication_year) else {
        return 0.0;
    };
    let gap = (current_year - year).max(1);
    count as f64 / gap as f64
}

/// Log-saturated citation sub-score:
/// `ln(1 + cpy) / ln(1 + K)` clipped to [0, 1], K = [`CITATION_SATURATION_CPY`].
/// Zero or unknown citations score 0.
pub fn citation_score(
    citation_count: Option<u64>,
    publication_year: Option<i32>,
    current_year: i32,
) -> f64 {
    let cpy = citations_per_year(citation_count, publication_year, current_year);
    if cpy <= 0.0 {
        return 0.0;
    }
    ((1.0 + cpy).ln() / (1.0 + CITATION_SATURATION_CPY).ln()).clamp(0.0, 1.0)
}

/// Open-access sub-score. Unknown is treated conservatively as not-open:
/// without evidence of availability, no credit is given.
pub fn open_access_score(is_open_access: TriState) -> f64 {
    match is_open_access {
        TriState::Yes => 1.0,
        TriState::No | TriState::Unknown => 0.0,
    }
}

/// Retraction penalty sub-score. Only a confirmed retraction zeroes the
/// category; unknown scores 1.0. This is the opposite unknown policy from
/// [`open_access_score`]: a paper is not penalised for a signal gap.
pub fn retraction_penalty_score(is_retracted: TriState) -> f64 {
    match is_retracted {
        TriState::Yes => 0.0,
        TriState::No | TriState::Unknown => 1.0,
    }
}

/// Funding-transparency sub-score.
pub fn funding_score(has_funding_info: bool) -> f64 {
    if has_funding_info {
        1.0
    } else {
        0.0
    }
}

/// Author-affiliation completeness is already normalised upstream;
/// pass it through clamped.
pub fn affiliation_score(quality: f64) -> f64 {
    quality.clamp(0.0, 1.0)
}

/// Journal-quality sub-score. Placeholder: no journal-rank data source is
/// wired up yet, so every publication gets the neutral midpoint.
pub fn journal_quality_score() -> f64 {
    0.5
}

/// Peer-review sub-score. Placeholder, same status as
/// [`journal_quality_score`].
pub fn peer_review_score() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_citations_per_year() {
        assert!((citations_per_year(Some(100), Some(2020), 2025) - 20.0).abs() < EPS);
        // Same-year publication divides by one.
        assert!((citations_per_year(Some(7), Some(2025), 2025) - 7.0).abs() < EPS);
        // Future year from dirty data also divides by one.
        assert!((citations_per_year(Some(7), Some(2030), 2025) - 7.0).abs() < EPS);
        assert_eq!(citations_per_year(None, Some(2020), 2025), 0.0);
        assert_eq!(citations_per_year(Some(10), None, 2025), 0.0);
    }

    #[test]
    fn test_citation_score_zero_and_unknown() {
        assert_eq!(citation_score(Some(0), Some(2020), 2025), 0.0);
        assert_eq!(citation_score(None, Some(2020), 2025), 0.0);
        assert_eq!(citation_score(Some(50), None, 2025), 0.0);
    }

    #[test]
    fn test_citation_score_saturates_at_k() {
        // 100 citations over a 5-year gap is exactly the saturation rate.
        let s = citation_score(Some(100), Some(2020), 2025);
        assert!((s - 1.0).abs() < EPS, "expected 1.0, got {s}");
        // Beyond K still clips to 1.0.
        let s = citation_score(Some(1000), Some(2020), 2025);
        assert!((s - 1.0).abs() < EPS);
    }

    #[test]
    fn test_citation_score_monotonic_in_count() {
        let mut prev = 0.0;
        for count in [0u64, 1, 5, 20, 50, 100, 500] {
            let s = citation_score(Some(count), Some(2020), 2025);
            assert!(s >= prev, "score decreased at count={count}");
            assert!((0.0..=1.0).contains(&s));
            prev = s;
        }
    }

    #[test]
    fn test_open_access_unknown_scores_zero() {
        assert_eq!(open_access_score(TriState::Yes), 1.0);
        assert_eq!(open_access_score(TriState::No), 0.0);
        assert_eq!(open_access_score(TriState::Unknown), 0.0);
    }

    #[test]
    fn test_retraction_unknown_scores_one() {
        // The asymmetric-unknown pair: unknown open access gives no credit,
        // unknown retraction takes no penalty.
        assert_eq!(retraction_penalty_score(TriState::Yes), 0.0);
        assert_eq!(retraction_penalty_score(TriState::No), 1.0);
        assert_eq!(retraction_penalty_score(TriState::Unknown), 1.0);
        assert_ne!(
            open_access_score(TriState::Unknown),
            retraction_penalty_score(TriState::Unknown)
        );
    }

    #[test]
    fn test_funding_and_affiliation() {
        assert_eq!(funding_score(true), 1.0);
        assert_eq!(funding_score(false), 0.0);
        assert_eq!(affiliation_score(0.75), 0.75);
        assert_eq!(affiliation_score(-0.5), 0.0);
        assert_eq!(affiliation_score(1.5), 1.0);
    }

    #[test]
    fn test_placeholder_scores() {
        assert_eq!(journal_quality_score(), 0.5);
        assert_eq!(peer_review_score(), 0.5);
    }
}
