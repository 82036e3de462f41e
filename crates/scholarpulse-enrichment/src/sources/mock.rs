//! Mock collaborators with hardcoded data for unit and pipeline tests.

use std::collections::HashMap;

use async_trait::async_trait;
use scholarpulse_common::{Result, ScholarPulseError};

use super::{CitationMetadataSource, OpenAccessSource, ProfileSource, RetractionSource};
use crate::correlate::normalise_title;
use crate::models::{CitationMetadata, Publication, PublicationRef, ScholarProfile, SourceMatch};

fn enrichment_err(source: &str) -> ScholarPulseError {
    ScholarPulseError::EnrichmentUnavailable {
        source_name: source.to_string(),
        message: "mock failure".to_string(),
    }
}

// ── Profile ────────────────────────────────────────────────────────────────

/// Mock profile source. Configure with a fixed profile, an empty profile
/// (→ `NotFound`), or an outage (→ `SourceUnavailable`).
pub struct MockProfileSource {
    profile: Option<ScholarProfile>,
    unavailable: bool,
}

impl MockProfileSource {
    pub fn with_profile(profile: ScholarProfile) -> Self {
        Self {
            profile: Some(profile),
            unavailable: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            profile: None,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            profile: None,
            unavailable: true,
        }
    }
}

#[async_trait]
impl ProfileSource for MockProfileSource {
    async fn fetch_profile(&self, scholar_id: &str) -> Result<ScholarProfile> {
        if self.unavailable {
            return Err(ScholarPulseError::SourceUnavailable {
                source_name: "mock-profile".to_string(),
                message: "mock outage".to_string(),
            });
        }
        match &self.profile {
            Some(p) => Ok(p.clone()),
            None => Err(ScholarPulseError::NotFound(scholar_id.to_string())),
        }
    }
}

/// Convenience builder for profile publications in tests.
pub fn publication(index: usize, title: &str, year: Option<i32>, cited_by: Option<u64>) -> Publication {
    Publication {
        title: title.to_string(),
        year,
        cited_by,
        doi: None,
        venue: None,
        author_count: None,
        index,
    }
}

// ── Citation metadata ──────────────────────────────────────────────────────

/// Mock citation-metadata source keyed by normalised title.
pub struct MockCitationSource {
    by_title: HashMap<String, (Option<i32>, CitationMetadata)>,
    fail: bool,
}

impl MockCitationSource {
    pub fn new() -> Self {
        Self {
            by_title: HashMap::new(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            by_title: HashMap::new(),
            fail: true,
        }
    }

    pub fn with(mut self, title: &str, year: Option<i32>, meta: CitationMetadata) -> Self {
        self.by_title
            .insert(normalise_title(title), (year, meta));
        self
    }
}

impl Default for MockCitationSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CitationMetadataSource for MockCitationSource {
    async fn fetch_citation_metadata(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<CitationMetadata>>> {
        if self.fail {
            return Err(enrichment_err("mock-citations"));
        }
        Ok(self
            .by_title
            .get(&normalise_title(publication.title))
            .map(|(year, meta)| {
                SourceMatch::by_title(Some(publication.title.to_string()), *year, meta.clone())
            }))
    }
}

// ── Retraction ─────────────────────────────────────────────────────────────

/// Mock retraction source keyed by normalised title.
pub struct MockRetractionSource {
    by_title: HashMap<String, (Option<i32>, bool)>,
    fail: bool,
}

impl MockRetractionSource {
    pub fn new() -> Self {
        Self {
            by_title: HashMap::new(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            by_title: HashMap::new(),
            fail: true,
        }
    }

    pub fn with(mut self, title: &str, year: Option<i32>, retracted: bool) -> Self {
        self.by_title
            .insert(normalise_title(title), (year, retracted));
        self
    }
}

impl Default for MockRetractionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RetractionSource for MockRetractionSource {
    async fn fetch_retraction_status(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<bool>>> {
        if self.fail {
            return Err(enrichment_err("mock-retraction"));
        }
        Ok(self
            .by_title
            .get(&normalise_title(publication.title))
            .map(|(year, retracted)| {
                SourceMatch::by_title(Some(publication.title.to_string()), *year, *retracted)
            }))
    }
}

// ── Open access ────────────────────────────────────────────────────────────

/// Mock open-access source keyed by DOI, mirroring Unpaywall.
pub struct MockOpenAccessSource {
    by_doi: HashMap<String, bool>,
    fail: bool,
}

impl MockOpenAccessSource {
    pub fn new() -> Self {
        Self {
            by_doi: HashMap::new(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            by_doi: HashMap::new(),
            fail: true,
        }
    }

    pub fn with(mut self, doi: &str, is_oa: bool) -> Self {
        self.by_doi.insert(doi.to_string(), is_oa);
        self
    }
}

impl Default for MockOpenAccessSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenAccessSource for MockOpenAccessSource {
    async fn fetch_open_access_status(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<bool>>> {
        if self.fail {
            return Err(enrichment_err("mock-open-access"));
        }
        let Some(doi) = publication.doi else {
            return Ok(None);
        };
        Ok(self.by_doi.get(doi).map(|&is_oa| SourceMatch::by_doi(is_oa)))
    }
}
