//! Unpaywall client — open-access status lookup.
//!
//! API: https://api.unpaywall.org/v2/{doi}?email=…
//! Strictly DOI-keyed: a publication without a DOI cannot be checked and its
//! open-access field stays unknown.

use async_trait::async_trait;
use scholarpulse_common::sandbox::SandboxClient as Client;
use scholarpulse_common::Result;
use tracing::{debug, instrument};

use super::OpenAccessSource;
use crate::models::{PublicationRef, SourceMatch};

const UNPAYWALL_URL: &str = "https://api.unpaywall.org/v2";

pub struct UnpaywallClient {
    client: Client,
    email: String,
}

impl UnpaywallClient {
    pub fn new(email: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
            email: email.into(),
        })
    }
}

#[async_trait]
impl OpenAccessSource for UnpaywallClient {
    #[instrument(skip(self))]
    async fn fetch_open_access_status(
        &self,
        publication: PublicationRef<'_>,
    ) -> Result<Option<SourceMatch<bool>>> {
        let Some(doi) = publication.doi else {
            return Ok(None);
        };

        let url = format!("{}/{}", UNPAYWALL_URL, doi);
        let resp = self
            .client
            .get(&url)?
            .query(&[("email", self.email.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Ok(None);
        }

        let body: serde_json::Value = resp.json().await?;
        let is_oa = body["is_oa"].as_bool().unwrap_or(false);
        debug!(doi, is_oa, "Unpaywall lookup hit");
        Ok(Some(SourceMatch::by_doi(is_oa)))
    }
}
