//! Collaborator capabilities and their concrete API clients.
//!
//! The pipeline consumes only the four traits below; the concrete providers
//! (SerpAPI, CrossRef, Semantic Scholar, Unpaywall) are interchangeable
//! plumbing. Each enrichment capability is independently fallible: a failed
//! lookup degrades one field of one publication, never the run.

pub mod crossref;
pub mod mock;
pub mod semanticscholar;
pub mod serpapi;
pub mod unpaywall;

use async_trait::async_trait;
use scholarpulse_common::Result;

use crate::models::{CitationMetadata, PublicationRef, ScholarProfile, SourceMatch};

/// Primary profile fetch. Failure here is fatal to the run:
/// `NotFound` when the identifier resolves to zero publications,
/// `SourceUnavailable` when the provider is unreachable.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, scholar_id: &str) -> Result<ScholarProfile>;
}

/// Citation metadata lookup: citation count, funding presence, and
/// bibliographic detail (journal, DOI, author affiliations).
#[async_trait]
pub trait CitationMetadataSource: Send + Sync {
    async fn fetch_citation_metadata(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<CitationMetadata>>>;
}

/// Retraction status lookup.
#[async_trait]
pub trait RetractionSource: Send + Sync {
    async fn fetch_retraction_status(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<bool>>>;
}

/// Open-access status lookup.
#[async_trait]
pub trait OpenAccessSource: Send + Sync {
    async fn fetch_open_access_status(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<bool>>>;
}
