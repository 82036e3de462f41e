//! Enrichment Aggregator.
//!
//! Merges a base profile publication with the results of the three secondary
//! lookups into one feature record. Every lookup is optional and
//! independently fallible: a failed or uncorrelated lookup leaves the
//! corresponding field in its unknown state and the publication is still
//! scored from whatever signals are available. No caching across calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::correlate::same_publication;
use crate::models::{Publication, PublicationRef, SourceMatch, TriState};
use crate::sources::{CitationMetadataSource, OpenAccessSource, RetractionSource};

/// The three secondary enrichment collaborators.
#[derive(Clone)]
pub struct EnrichmentSources {
    pub citations: Arc<dyn CitationMetadataSource>,
    pub retraction: Arc<dyn RetractionSource>,
    pub open_access: Arc<dyn OpenAccessSource>,
}

/// One publication's merged feature record, ready for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub title: String,
    pub year: Option<i32>,
    pub doi: Option<String>,
    pub journal: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub author_count: Option<usize>,
    pub affiliations: Option<String>,
    pub citation_count: Option<u64>,
    pub has_funding_info: bool,
    pub is_open_access: TriState,
    pub is_retracted: TriState,
    /// Fraction of authors with complete affiliation data, 0.0 when unknown.
    pub affiliation_quality: f64,
    /// Lookups that errored out for this publication.
    pub enrichment_failures: usize,
    /// Original fetch position, preserved for deterministic ordering.
    pub index: usize,
}

impl FeatureRecord {
    /// A record carrying only what the profile fetch provided, all
    /// enrichment fields at their unknown defaults.
    pub fn degraded(base: &Publication) -> Self {
        Self {
            title: base.title.clone(),
            year: base.year,
            doi: base.doi.clone(),
            journal: base.venue.clone(),
            volume: None,
            issue: None,
            author_count: base.author_count,
            affiliations: None,
            citation_count: base.cited_by,
            has_funding_info: false,
            is_open_access: TriState::Unknown,
            is_retracted: TriState::Unknown,
            affiliation_quality: 0.0,
            enrichment_failures: 0,
            index: base.index,
        }
    }

    /// Number of feature fields left at an unknown default. Reported so a
    /// degraded run is visibly degraded, never silently complete.
    pub fn unknown_field_count(&self) -> usize {
        let mut n = 0;
        if self.citation_count.is_none() {
            n += 1;
        }
        if self.is_open_access.is_unknown() {
            n += 1;
        }
        if self.is_retracted.is_unknown() {
            n += 1;
        }
        n
    }
}

/// Accept a lookup result only when it is DOI-keyed or correlates with the
/// base record on normalised title + year.
fn correlated<T>(base: &Publication, m: SourceMatch<T>) -> Option<T> {
    if m.via_doi
        || same_publication(
            &base.title,
            base.year,
            m.matched_title.as_deref(),
            m.matched_year,
        )
    {
        Some(m.value)
    } else {
        debug!(
            title = %base.title,
            matched = ?m.matched_title,
            "enrichment record did not correlate; keeping field unknown"
        );
        None
    }
}

/// Merge one publication with the three enrichment lookups.
///
/// Lookups run in order (citations, retraction, open access) so a DOI
/// resolved by the citation-metadata source can key the later DOI-only
/// lookups. Errors are logged and counted, never propagated.
#[instrument(skip(sources), fields(title = %base.title))]
pub async fn enrich_publication(base: &Publication, sources: &EnrichmentSources) -> FeatureRecord {
    let mut record = FeatureRecord::degraded(base);

    // 1. Citation metadata (citation count, funding, bibliographic detail)
    let pub_ref = PublicationRef::new(record.doi.as_deref(), &base.title, base.year);
    match sources.citations.fetch_citation_metadata(pub_ref).await {
        Ok(Some(m)) => {
            if let Some(meta) = correlated(base, m) {
                record.citation_count = meta.citation_count.or(base.cited_by);
                record.has_funding_info = meta.has_funding_info;
                record.affiliation_quality = meta.affiliation_quality().unwrap_or(0.0);
                if meta.journal.is_some() {
                    record.journal = meta.journal;
                }
                record.volume = meta.volume;
                record.issue = meta.issue;
                if meta.author_count.is_some() {
                    record.author_count = meta.author_count;
                }
                record.affiliations = meta.affiliations.clone();
                // Adopt a resolved DOI for the DOI-keyed lookups below.
                if record.doi.is_none() {
                    record.doi = meta.doi;
                }
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "citation metadata lookup failed");
            record.enrichment_failures += 1;
        }
    }

    // 2. Retraction status
    let pub_ref = PublicationRef::new(record.doi.as_deref(), &base.title, base.year);
    match sources.retraction.fetch_retraction_status(pub_ref).await {
        Ok(Some(m)) => {
            if let Some(retracted) = correlated(base, m) {
                record.is_retracted = TriState::from_option(Some(retracted));
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "retraction lookup failed");
            record.enrichment_failures += 1;
        }
    }

    // 3. Open-access status
    let pub_ref = PublicationRef::new(record.doi.as_deref(), &base.title, base.year);
    match sources.open_access.fetch_open_access_status(pub_ref).await {
        Ok(Some(m)) => {
            if let Some(is_oa) = correlated(base, m) {
                record.is_open_access = TriState::from_option(Some(is_oa));
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "open-access lookup failed");
            record.enrichment_failures += 1;
        }
    }

    record
}
