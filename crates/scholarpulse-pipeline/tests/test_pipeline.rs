//! End-to-end pipeline tests against mock collaborators.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use scholarpulse_common::{Result, ScholarPulseError};
use scholarpulse_enrichment::models::{
    CitationMetadata, Publication, PublicationRef, ScholarProfile, SourceMatch,
};
use scholarpulse_enrichment::sources::mock::{
    publication, MockCitationSource, MockOpenAccessSource, MockProfileSource,
    MockRetractionSource,
};
use scholarpulse_enrichment::sources::CitationMetadataSource;
use scholarpulse_enrichment::{EnrichmentSources, TriState};
use scholarpulse_pipeline::{analyze, AnalysisJob};
use scholarpulse_scorer::RimBand;

fn empty_sources() -> EnrichmentSources {
    EnrichmentSources {
        citations: Arc::new(MockCitationSource::new()),
        retraction: Arc::new(MockRetractionSource::new()),
        open_access: Arc::new(MockOpenAccessSource::new()),
    }
}

fn profile(publications: Vec<Publication>) -> ScholarProfile {
    ScholarProfile {
        scholar_id: "scholar-1".to_string(),
        name: Some("Jane Doe".to_string()),
        publications,
    }
}

#[tokio::test]
async fn test_empty_profile_fails_not_found() {
    let job = AnalysisJob::new("scholar-1", 2025);
    let err = analyze(&job, &MockProfileSource::empty(), &empty_sources())
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarPulseError::NotFound(_)));
}

#[tokio::test]
async fn test_profile_outage_fails_source_unavailable() {
    let job = AnalysisJob::new("scholar-1", 2025);
    let err = analyze(&job, &MockProfileSource::unavailable(), &empty_sources())
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarPulseError::SourceUnavailable { .. }));
}

#[tokio::test]
async fn test_invalid_weights_fail_before_any_fetch() {
    let mut job = AnalysisJob::new("scholar-1", 2025);
    job.weights.citations = 0.9;
    // Even an unreachable profile source is never consulted.
    let err = analyze(&job, &MockProfileSource::unavailable(), &empty_sources())
        .await
        .unwrap_err();
    assert!(matches!(err, ScholarPulseError::Config(_)));
}

#[tokio::test]
async fn test_top_ten_selection_and_ordering() {
    // 12 publications; the report must hold the 10 most-cited in
    // deterministic order.
    let pubs: Vec<Publication> = (0..12)
        .map(|i| publication(i, &format!("Paper {i}"), Some(2015 + i as i32 % 5), Some(10 * i as u64)))
        .collect();
    let source = MockProfileSource::with_profile(profile(pubs));

    let job = AnalysisJob::new("scholar-1", 2025);
    let report = analyze(&job, &source, &empty_sources()).await.unwrap();

    assert_eq!(report.publications.len(), 10);
    let counts: Vec<Option<u64>> = report
        .publications
        .iter()
        .map(|p| p.record.citation_count)
        .collect();
    let mut sorted = counts.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(counts, sorted, "report must be ordered by citation count");
    assert_eq!(counts[0], Some(110));
    assert_eq!(counts[9], Some(20));
}

#[tokio::test]
async fn test_full_run_with_enrichment() {
    let base = publication(0, "Paper A", Some(2020), Some(100));
    let source = MockProfileSource::with_profile(profile(vec![base]));

    let meta = CitationMetadata {
        citation_count: Some(100),
        has_funding_info: true,
        doi: Some("10.1038/x".to_string()),
        journal: Some("Nature Methods".to_string()),
        author_count: Some(2),
        authors_with_affiliation: Some(2),
        ..Default::default()
    };
    let sources = EnrichmentSources {
        citations: Arc::new(MockCitationSource::new().with("Paper A", Some(2020), meta)),
        retraction: Arc::new(MockRetractionSource::new().with("Paper A", Some(2020), false)),
        open_access: Arc::new(MockOpenAccessSource::new().with("10.1038/x", true)),
    };

    let job = AnalysisJob::new("scholar-1", 2025);
    let report = analyze(&job, &source, &sources).await.unwrap();

    assert_eq!(report.scholar_name.as_deref(), Some("Jane Doe"));
    assert_eq!(report.publications.len(), 1);
    // The worked scenario: every signal positive, cpy at saturation.
    assert_eq!(report.publications[0].rim_score, 87.5);
    assert_eq!(report.aggregate_rim, 87.5);
    assert_eq!(report.aggregate_band, RimBand::Excellent);
    assert_eq!(report.degraded_publications, 0);
    assert_eq!(report.unknown_fields, 0);
    assert_eq!(report.enrichment_failures, 0);
}

#[tokio::test]
async fn test_enrichment_failures_degrade_but_do_not_abort() {
    let pubs = vec![
        publication(0, "Paper A", Some(2020), Some(100)),
        publication(1, "Paper B", Some(2021), Some(50)),
    ];
    let source = MockProfileSource::with_profile(profile(pubs));

    let sources = EnrichmentSources {
        citations: Arc::new(MockCitationSource::failing()),
        retraction: Arc::new(MockRetractionSource::failing()),
        open_access: Arc::new(MockOpenAccessSource::failing()),
    };

    let job = AnalysisJob::new("scholar-1", 2025);
    let report = analyze(&job, &source, &sources).await.unwrap();

    assert_eq!(report.publications.len(), 2);
    assert_eq!(report.degraded_publications, 2);
    assert_eq!(report.enrichment_failures, 6);
    for p in &report.publications {
        assert_eq!(p.record.is_open_access, TriState::Unknown);
        assert_eq!(p.record.is_retracted, TriState::Unknown);
        // Profile citation counts survive the enrichment outage.
        assert!(p.record.citation_count.is_some());
    }
}

#[tokio::test]
async fn test_analyze_is_deterministic() {
    let pubs: Vec<Publication> = (0..8)
        .map(|i| publication(i, &format!("Paper {i}"), Some(2018), Some(7 * i as u64 % 40)))
        .collect();
    let source = MockProfileSource::with_profile(profile(pubs));
    let sources = empty_sources();

    let job = AnalysisJob::new("scholar-1", 2025);
    let first = analyze(&job, &source, &sources).await.unwrap();
    let second = analyze(&job, &source, &sources).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ── Per-publication timeout ────────────────────────────────────────────────

struct SlowCitationSource;

#[async_trait]
impl CitationMetadataSource for SlowCitationSource {
    async fn fetch_citation_metadata(
        &self,
        _publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<CitationMetadata>>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }
}

#[tokio::test]
async fn test_per_publication_timeout_degrades_to_unknown() {
    let base = publication(0, "Paper A", Some(2020), Some(100));
    let source = MockProfileSource::with_profile(profile(vec![base]));

    let sources = EnrichmentSources {
        citations: Arc::new(SlowCitationSource),
        retraction: Arc::new(MockRetractionSource::new()),
        open_access: Arc::new(MockOpenAccessSource::new()),
    };

    let mut job = AnalysisJob::new("scholar-1", 2025);
    job.per_publication_timeout = Duration::from_millis(20);
    let report = analyze(&job, &source, &sources).await.unwrap();

    assert_eq!(report.publications.len(), 1);
    let record = &report.publications[0].record;
    assert_eq!(record.is_open_access, TriState::Unknown);
    assert_eq!(record.is_retracted, TriState::Unknown);
    assert_eq!(record.citation_count, Some(100));
}

#[tokio::test]
async fn test_run_timeout_surfaces_timeout_error() {
    let base = publication(0, "Paper A", Some(2020), Some(100));
    let source = MockProfileSource::with_profile(profile(vec![base]));

    let sources = EnrichmentSources {
        citations: Arc::new(SlowCitationSource),
        retraction: Arc::new(MockRetractionSource::new()),
        open_access: Arc::new(MockOpenAccessSource::new()),
    };

    let mut job = AnalysisJob::new("scholar-1", 2025);
    job.run_timeout = Some(Duration::from_millis(20));
    let err = analyze(&job, &source, &sources).await.unwrap_err();
    assert!(matches!(err, ScholarPulseError::Timeout(_)));
}

#[tokio::test]
async fn test_sequential_mode_matches_concurrent_mode() {
    let pubs: Vec<Publication> = (0..4)
        .map(|i| publication(i, &format!("Paper {i}"), Some(2019), Some(5 * i as u64)))
        .collect();
    let source = MockProfileSource::with_profile(profile(pubs));
    let sources = empty_sources();

    let mut sequential = AnalysisJob::new("scholar-1", 2025);
    sequential.enrichment_concurrency = 1;
    sequential.polite_delay = Duration::ZERO;
    let mut concurrent = AnalysisJob::new("scholar-1", 2025);
    concurrent.enrichment_concurrency = 4;

    let a = analyze(&sequential, &source, &sources).await.unwrap();
    let b = analyze(&concurrent, &source, &sources).await.unwrap();
    assert_eq!(a, b);
}
