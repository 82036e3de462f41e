//! CrossRef works client — citation-metadata enrichment.
//!
//! Used for two purposes:
//! 1. Resolving a known DOI to full metadata (journal, funding, affiliations)
//! 2. Title-search fallback when the profile record carries no DOI
//!
//! API: https://api.crossref.org/works/{doi}
//! Polite pool: User-Agent with mailto is set on the sandbox client.

use async_trait::async_trait;
use scholarpulse_common::sandbox::SandboxClient as Client;
use scholarpulse_common::Result;
use tracing::{debug, instrument};

use super::CitationMetadataSource;
use crate::models::{CitationMetadata, PublicationRef, SourceMatch};

const CR_API_BASE: &str = "https://api.crossref.org/works";

pub struct CrossRefClient {
    client: Client,
}

impl CrossRefClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
        })
    }

    /// Resolve a single DOI to a CrossRef work object.
    #[instrument(skip(self))]
    async fn fetch_by_doi(&self, doi: &str) -> Result<Option<serde_json::Value>> {
        let url = format!("{}/{}", CR_API_BASE, doi);
        let resp = self.client.get(&url)?.send().await?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let body: serde_json::Value = resp.json().await?;
        Ok(Some(body["message"].clone()))
    }

    /// Best single match for a free-text title query.
    #[instrument(skip(self))]
    async fn search_by_title(&self, title: &str) -> Result<Option<serde_json::Value>> {
        let resp: serde_json::Value = self
            .client
            .get(CR_API_BASE)?
            .query(&[("query.title", title), ("rows", "1")])
            .send()
            .await?
            .json()
            .await?;

        Ok(resp["message"]["items"]
            .as_array()
            .and_then(|items| items.first())
            .cloned())
    }
}

#[async_trait]
impl CitationMetadataSource for CrossRefClient {
    async fn fetch_citation_metadata(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<CitationMetadata>>> {
        if let Some(doi) = publication.doi {
            if let Some(work) = self.fetch_by_doi(doi).await? {
                debug!(doi, "CrossRef DOI lookup hit");
                return Ok(Some(SourceMatch::by_doi(work_to_metadata(&work))));
            }
        }

        let Some(work) = self.search_by_title(publication.title).await? else {
            return Ok(None);
        };
        debug!(title = publication.title, "CrossRef title search hit");
        Ok(Some(SourceMatch::by_title(
            work_title(&work),
            work_year(&work),
            work_to_metadata(&work),
        )))
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────

fn work_title(work: &serde_json::Value) -> Option<String> {
    work["title"]
        .as_array()
        .and_then(|t| t.first())
        .and_then(|t| t.as_str())
        .map(String::from)
}

fn work_year(work: &serde_json::Value) -> Option<i32> {
    for field in ["issued", "published-print", "published"] {
        let year = work[field]["date-parts"]
            .as_array()
            .and_then(|dp| dp.first())
            .and_then(|dp| dp.as_array())
            .and_then(|parts| parts.first())
            .and_then(|y| y.as_i64());
        if let Some(y) = year {
            return Some(y as i32);
        }
    }
    None
}

fn work_to_metadata(work: &serde_json::Value) -> CitationMetadata {
    let authors = work["author"].as_array().cloned().unwrap_or_default();
    let author_count = authors.len();

    let mut with_affiliation = 0usize;
    let mut affiliation_names: Vec<String> = Vec::new();
    for author in &authors {
        let affs = author["affiliation"].as_array().cloned().unwrap_or_default();
        if affs.iter().any(|a| a["name"].as_str().is_some()) {
            with_affiliation += 1;
        }
        for aff in &affs {
            if let Some(name) = aff["name"].as_str() {
                let name = name.trim().to_string();
                if !name.is_empty() && !affiliation_names.contains(&name) {
                    affiliation_names.push(name);
                }
            }
        }
    }

    CitationMetadata {
        citation_count: work["is-referenced-by-count"].as_u64(),
        has_funding_info: work["funder"]
            .as_array()
            .map(|f| !f.is_empty())
            .unwrap_or(false),
        doi: work["DOI"].as_str().map(String::from),
        journal: work["container-title"]
            .as_array()
            .and_then(|j| j.first())
            .and_then(|j| j.as_str())
            .map(String::from),
        volume: work["volume"].as_str().map(String::from),
        issue: work["issue"].as_str().map(String::from),
        author_count: (author_count > 0).then_some(author_count),
        authors_with_affiliation: (author_count > 0).then_some(with_affiliation),
        affiliations: (!affiliation_names.is_empty()).then(|| affiliation_names.join("; ")),
    }
}
