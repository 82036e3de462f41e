//! SerpAPI Google Scholar author client — the primary profile source.
//!
//! API: https://serpapi.com/search.json?engine=google_scholar_author
//! Returns the scholar's display name and articles in profile order, with
//! cited-by counts. DOIs are not first-class in the response, so they are
//! harvested best-effort from link and publication fields.

use async_trait::async_trait;
use scholarpulse_common::sandbox::SandboxClient as Client;
use scholarpulse_common::{Result, ScholarPulseError};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::ProfileSource;
use crate::correlate::extract_doi;
use crate::models::{Publication, ScholarProfile};

const SEARCH_URL: &str = "https://serpapi.com/search.json";

pub struct SerpApiClient {
    client: Client,
    api_key: SecretString,
}

impl SerpApiClient {
    pub fn new(api_key: SecretString) -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
            api_key,
        })
    }

    fn unavailable(message: String) -> ScholarPulseError {
        ScholarPulseError::SourceUnavailable {
            source_name: "serpapi".to_string(),
            message,
        }
    }
}

#[async_trait]
impl ProfileSource for SerpApiClient {
    #[instrument(skip(self))]
    async fn fetch_profile(&self, scholar_id: &str) -> Result<ScholarProfile> {
        let resp = self
            .client
            .get(SEARCH_URL)?
            .query(&[
                ("engine", "google_scholar_author"),
                ("author_id", scholar_id),
                ("api_key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| Self::unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::unavailable(format!("HTTP {}", resp.status())));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Self::unavailable(e.to_string()))?;

        let profile = parse_author_response(scholar_id, &body);
        debug!(n = profile.publications.len(), "SerpAPI profile fetched");

        if profile.publications.is_empty() {
            return Err(ScholarPulseError::NotFound(scholar_id.to_string()));
        }
        Ok(profile)
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────

fn parse_author_response(scholar_id: &str, body: &serde_json::Value) -> ScholarProfile {
    let name = body["author"]["name"].as_str().map(String::from);

    let publications = body["articles"]
        .as_array()
        .unwrap_or(&vec![])
        .iter()
        .enumerate()
        .map(|(index, article)| article_to_publication(index, article))
        .filter(|p| !p.title.is_empty())
        .collect();

    ScholarProfile {
        scholar_id: scholar_id.to_string(),
        name,
        publications,
    }
}

fn article_to_publication(index: usize, article: &serde_json::Value) -> Publication {
    let title = article["title"].as_str().unwrap_or("").trim().to_string();

    let year = article["year"]
        .as_i64()
        .map(|y| y as i32)
        .or_else(|| article["year"].as_str().and_then(|y| y.trim().parse().ok()));

    // cited_by is an object on the author engine, occasionally a bare number.
    let cited_by = article["cited_by"]["value"]
        .as_u64()
        .or_else(|| article["cited_by"].as_u64());

    let venue = article["publication"]
        .as_str()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let author_count = article["authors"]
        .as_str()
        .map(|a| a.split(',').filter(|s| !s.trim().is_empty()).count())
        .filter(|&n| n > 0);

    Publication {
        title,
        year,
        cited_by,
        doi: doi_from_article(article),
        venue,
        author_count,
        index,
    }
}

/// Scan the article's link-bearing fields for anything that looks like a DOI.
fn doi_from_article(article: &serde_json::Value) -> Option<String> {
    for key in ["link", "citation_id", "publication", "authors"] {
        if let Some(text) = article[key].as_str() {
            if let Some(doi) = extract_doi(text) {
                return Some(doi);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_author_response() {
        let body = serde_json::json!({
            "author": { "name": "Jane Doe" },
            "articles": [
                {
                    "title": "Deep Learning for Genomics",
                    "authors": "J Doe, R Roe",
                    "publication": "Nature Methods 17 (4), 2020",
                    "year": "2020",
                    "cited_by": { "value": 245 },
                    "link": "https://doi.org/10.1038/s41592-020-0001-x"
                },
                {
                    "title": "A Second Paper",
                    "year": 2018,
                    "cited_by": 12
                }
            ]
        });

        let profile = parse_author_response("tPeUsekAAAAJ", &body);
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
        assert_eq!(profile.publications.len(), 2);

        let first = &profile.publications[0];
        assert_eq!(first.title, "Deep Learning for Genomics");
        assert_eq!(first.year, Some(2020));
        assert_eq!(first.cited_by, Some(245));
        assert_eq!(first.doi.as_deref(), Some("10.1038/s41592-020-0001-x"));
        assert_eq!(first.author_count, Some(2));
        assert_eq!(first.index, 0);

        let second = &profile.publications[1];
        assert_eq!(second.year, Some(2018));
        assert_eq!(second.cited_by, Some(12));
        assert_eq!(second.doi, None);
        assert_eq!(second.index, 1);
    }

    #[test]
    fn test_empty_titles_dropped() {
        let body = serde_json::json!({
            "author": { "name": "Jane Doe" },
            "articles": [ { "title": "  " }, { "title": "Kept" } ]
        });
        let profile = parse_author_response("x", &body);
        assert_eq!(profile.publications.len(), 1);
        assert_eq!(profile.publications[0].title, "Kept");
    }
}
