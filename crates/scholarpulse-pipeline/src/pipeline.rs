//! End-to-end analysis pipeline.
//!
//! Orchestrates the full flow for one scholar:
//!   1. Validate the weight policy
//!   2. Fetch the scholar profile (fatal on NotFound / SourceUnavailable)
//!   3. Select the top-N publications by citation count
//!   4. Enrich each selected publication (independent, fallible, bounded
//!      concurrent fan-out; per-publication timeouts degrade to unknown)
//!   5. Score each publication and assemble the immutable report
//!
//! No state is held across runs; concurrent scholar analyses are fully
//! independent.

use std::cmp::Reverse;
use std::time::Duration;

use futures_util::{stream, StreamExt};
use tokio::time::timeout;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use scholarpulse_common::{Result, ScholarPulseError};
use scholarpulse_enrichment::sources::ProfileSource;
use scholarpulse_enrichment::{
    enrich_publication, EnrichmentSources, FeatureRecord, Publication,
};
use scholarpulse_scorer::{aggregate_rim, score_publication, RimBand, WeightTable};

use crate::report::ScholarReport;

/// Parameters for a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub scholar_id: String,
    /// How many publications to select, by citation count. Default 10.
    pub top_n: usize,
    /// Reference year for citations-per-year.
    pub current_year: i32,
    pub weights: WeightTable,
    /// Bound on concurrent per-publication enrichment; external APIs are
    /// rate-limited, so this stays small.
    pub enrichment_concurrency: usize,
    /// Budget per publication; on expiry that publication's enrichment
    /// fields degrade to unknown.
    pub per_publication_timeout: Duration,
    /// Budget for the whole run; on expiry `analyze` fails with `Timeout`.
    pub run_timeout: Option<Duration>,
    /// Pause between publications when running sequentially
    /// (`enrichment_concurrency` ≤ 1), out of politeness to the APIs.
    pub polite_delay: Duration,
}

impl AnalysisJob {
    pub fn new(scholar_id: impl Into<String>, current_year: i32) -> Self {
        Self {
            scholar_id: scholar_id.into(),
            top_n: 10,
            current_year,
            weights: WeightTable::default(),
            enrichment_concurrency: 3,
            per_publication_timeout: Duration::from_secs(30),
            run_timeout: None,
            polite_delay: Duration::from_millis(1000),
        }
    }
}

/// Select the top-N publications by citation count.
///
/// Deterministic composite key: citation count descending, year descending,
/// original fetch order ascending. Missing counts sort as zero, missing
/// years last.
pub fn select_top_publications(publications: &[Publication], top_n: usize) -> Vec<Publication> {
    let mut sorted: Vec<&Publication> = publications.iter().collect();
    sorted.sort_by_key(|p| {
        (
            Reverse(p.cited_by.unwrap_or(0)),
            Reverse(p.year.unwrap_or(i32::MIN)),
            p.index,
        )
    });
    sorted.into_iter().take(top_n).cloned().collect()
}

/// Run one scholar analysis end to end.
///
/// Fatal outcomes: `NotFound` (zero publications), `SourceUnavailable`
/// (profile source unreachable), `Timeout` (run budget exhausted), `Config`
/// (invalid weight table). Per-publication enrichment failures are absorbed
/// into unknown fields and surfaced via the report's degradation counters.
pub async fn analyze(
    job: &AnalysisJob,
    profile_source: &dyn ProfileSource,
    sources: &EnrichmentSources,
) -> Result<ScholarReport> {
    job.weights.validate()?;

    match job.run_timeout {
        Some(budget) => timeout(budget, analyze_inner(job, profile_source, sources))
            .await
            .map_err(|_| ScholarPulseError::Timeout(budget.as_millis() as u64))?,
        None => analyze_inner(job, profile_source, sources).await,
    }
}

#[instrument(skip_all, fields(scholar_id = %job.scholar_id))]
async fn analyze_inner(
    job: &AnalysisJob,
    profile_source: &dyn ProfileSource,
    sources: &EnrichmentSources,
) -> Result<ScholarReport> {
    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, "starting scholar analysis");

    let profile = profile_source.fetch_profile(&job.scholar_id).await?;
    if profile.publications.is_empty() {
        return Err(ScholarPulseError::NotFound(job.scholar_id.clone()));
    }

    let selected = select_top_publications(&profile.publications, job.top_n);
    info!(
        run_id = %run_id,
        found = profile.publications.len(),
        selected = selected.len(),
        "profile fetched"
    );

    let records = if job.enrichment_concurrency <= 1 {
        enrich_sequential(job, &selected, sources).await
    } else {
        enrich_concurrent(job, &selected, sources).await
    };

    let scored: Vec<_> = records
        .into_iter()
        .map(|r| score_publication(r, &job.weights, job.current_year))
        .collect();

    let aggregate = aggregate_rim(&scored)
        .ok_or_else(|| ScholarPulseError::NotFound(job.scholar_id.clone()))?;

    let degraded_publications = scored
        .iter()
        .filter(|s| s.record.unknown_field_count() > 0)
        .count();
    let unknown_fields = scored
        .iter()
        .map(|s| s.record.unknown_field_count())
        .sum();
    let enrichment_failures = scored.iter().map(|s| s.record.enrichment_failures).sum();

    info!(
        run_id = %run_id,
        publications = scored.len(),
        aggregate_rim = aggregate,
        degraded = degraded_publications,
        "analysis complete"
    );

    Ok(ScholarReport {
        scholar_id: job.scholar_id.clone(),
        scholar_name: profile.name,
        current_year: job.current_year,
        weights: job.weights.clone(),
        publications: scored,
        aggregate_rim: aggregate,
        aggregate_band: RimBand::from_score(aggregate),
        degraded_publications,
        unknown_fields,
        enrichment_failures,
    })
}

/// Enrich one publication within the per-publication budget; expiry degrades
/// every enrichment field to unknown instead of aborting the run.
async fn enrich_with_budget(
    job: &AnalysisJob,
    publication: &Publication,
    sources: &EnrichmentSources,
) -> FeatureRecord {
    match timeout(
        job.per_publication_timeout,
        enrich_publication(publication, sources),
    )
    .await
    {
        Ok(record) => record,
        Err(_) => {
            warn!(
                title = %publication.title,
                budget_ms = job.per_publication_timeout.as_millis() as u64,
                "publication enrichment timed out; degrading to unknown"
            );
            FeatureRecord::degraded(publication)
        }
    }
}

async fn enrich_sequential(
    job: &AnalysisJob,
    selected: &[Publication],
    sources: &EnrichmentSources,
) -> Vec<FeatureRecord> {
    let mut records = Vec::with_capacity(selected.len());
    for (i, publication) in selected.iter().enumerate() {
        if i > 0 && !job.polite_delay.is_zero() {
            tokio::time::sleep(job.polite_delay).await;
        }
        records.push(enrich_with_budget(job, publication, sources).await);
    }
    records
}

async fn enrich_concurrent(
    job: &AnalysisJob,
    selected: &[Publication],
    sources: &EnrichmentSources,
) -> Vec<FeatureRecord> {
    let mut records: Vec<(usize, FeatureRecord)> = stream::iter(selected.iter().enumerate())
        .map(|(rank, publication)| async move {
            (rank, enrich_with_budget(job, publication, sources).await)
        })
        .buffer_unordered(job.enrichment_concurrency)
        .collect()
        .await;

    // Completion order is nondeterministic; the report order is not.
    records.sort_by_key(|(rank, _)| *rank);
    records.into_iter().map(|(_, r)| r).collect()
}
