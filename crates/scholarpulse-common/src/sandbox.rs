use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::error::ScholarPulseError;

/// Polite-pool identification sent to every bibliographic API.
pub const USER_AGENT: &str = "ScholarPulse/0.1 (mailto:scholarpulse@example.com)";

/// An allowlist-capped HTTP client. Every collaborator call goes through
/// here, so a misconfigured client cannot reach anything beyond the four
/// bibliographic providers.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient allowing only the bibliographic providers
    /// Scholar Pulse talks to.
    pub fn new() -> Result<Self, ScholarPulseError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "serpapi.com",             // Google Scholar profiles
            "api.crossref.org",        // CrossRef works
            "api.semanticscholar.org", // Semantic Scholar graph
            "api.unpaywall.org",       // Unpaywall open-access
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ScholarPulseError::Config(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Exposes the inner `reqwest::Client` builder pattern for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, ScholarPulseError> {
        if !self.is_allowed(url) {
            return Err(ScholarPulseError::Sandbox(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
