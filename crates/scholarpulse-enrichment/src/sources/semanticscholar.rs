//! Semantic Scholar graph client — retraction status lookup.
//!
//! API: https://api.semanticscholar.org/graph/v1/paper/DOI:{doi}
//!      https://api.semanticscholar.org/graph/v1/paper/search?query=…
//! The `isRetracted` field is the sole retraction signal; title-search hits
//! carry their own title/year so the aggregator can correlate them.

use async_trait::async_trait;
use scholarpulse_common::sandbox::SandboxClient as Client;
use scholarpulse_common::Result;
use tracing::{debug, instrument};

use super::RetractionSource;
use crate::models::{PublicationRef, SourceMatch};

const S2_PAPER_URL: &str = "https://api.semanticscholar.org/graph/v1/paper";
const S2_SEARCH_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/search";
const S2_FIELDS: &str = "title,year,isRetracted";

pub struct SemanticScholarClient {
    client: Client,
}

impl SemanticScholarClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_by_doi(&self, doi: &str) -> Result<Option<serde_json::Value>> {
        let url = format!("{}/DOI:{}", S2_PAPER_URL, doi);
        let resp = self
            .client
            .get(&url)?
            .query(&[("fields", S2_FIELDS)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        Ok(Some(resp.json().await?))
    }

    #[instrument(skip(self))]
    async fn search_by_title(&self, title: &str) -> Result<Option<serde_json::Value>> {
        let resp: serde_json::Value = self
            .client
            .get(S2_SEARCH_URL)?
            .query(&[("query", title), ("limit", "1"), ("fields", S2_FIELDS)])
            .send()
            .await?
            .json()
            .await?;

        Ok(resp["data"]
            .as_array()
            .and_then(|data| data.first())
            .cloned())
    }
}

#[async_trait]
impl RetractionSource for SemanticScholarClient {
    async fn fetch_retraction_status(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<bool>>> {
        if let Some(doi) = publication.doi {
            if let Some(paper) = self.fetch_by_doi(doi).await? {
                debug!(doi, "Semantic Scholar DOI lookup hit");
                return Ok(Some(SourceMatch::by_doi(paper_retracted(&paper))));
            }
        }

        let Some(paper) = self.search_by_title(publication.title).await? else {
            return Ok(None);
        };
        debug!(title = publication.title, "Semantic Scholar title search hit");
        Ok(Some(SourceMatch::by_title(
            paper["title"].as_str().map(String::from),
            paper["year"].as_i64().map(|y| y as i32),
            paper_retracted(&paper),
        )))
    }
}

fn paper_retracted(paper: &serde_json::Value) -> bool {
    paper["isRetracted"].as_bool().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_retracted_flag() {
        assert!(paper_retracted(&serde_json::json!({ "isRetracted": true })));
        assert!(!paper_retracted(&serde_json::json!({ "isRetracted": false })));
        // Missing flag is read as not-retracted; the aggregator only applies
        // it when the record correlates at all.
        assert!(!paper_retracted(&serde_json::json!({})));
    }
}
