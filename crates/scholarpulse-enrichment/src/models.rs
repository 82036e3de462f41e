//! Data models shared by the profile fetch and enrichment stages.

use serde::{Deserialize, Serialize};

/// A true/false signal whose absence is meaningful.
///
/// Each scoring category applies its own unknown policy: open access treats
/// `Unknown` as not-open, retraction treats `Unknown` as not-retracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    Yes,
    No,
    Unknown,
}

impl TriState {
    pub fn from_option(value: Option<bool>) -> Self {
        match value {
            Some(true) => TriState::Yes,
            Some(false) => TriState::No,
            None => TriState::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TriState::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriState::Yes => "yes",
            TriState::No => "no",
            TriState::Unknown => "unknown",
        }
    }
}

impl Default for TriState {
    fn default() -> Self {
        TriState::Unknown
    }
}

/// A publication as returned by the scholar profile source, before any
/// enrichment. `index` records the original fetch position and is the final
/// tie-break in top-N selection, so ordering stays reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub year: Option<i32>,
    /// Cited-by count reported by the profile source, if any.
    pub cited_by: Option<u64>,
    /// Best-effort DOI harvested from the profile record.
    pub doi: Option<String>,
    /// Venue string from the profile source (journal or conference).
    pub venue: Option<String>,
    pub author_count: Option<usize>,
    pub index: usize,
}

/// A scholar profile: display name plus publications in fetch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarProfile {
    pub scholar_id: String,
    pub name: Option<String>,
    pub publications: Vec<Publication>,
}

/// Lookup key handed to enrichment collaborators.
#[derive(Debug, Clone, Copy)]
pub struct PublicationRef<'a> {
    pub doi: Option<&'a str>,
    pub title: &'a str,
    pub year: Option<i32>,
}

impl<'a> PublicationRef<'a> {
    pub fn new(doi: Option<&'a str>, title: &'a str, year: Option<i32>) -> Self {
        Self { doi, title, year }
    }
}

/// A value returned by an enrichment collaborator together with the
/// bibliographic identity of the record it came from.
///
/// DOI-keyed responses (`via_doi`) are trusted as-is; title-search responses
/// must pass the aggregator's title/year correlation before being applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMatch<T> {
    pub matched_title: Option<String>,
    pub matched_year: Option<i32>,
    pub via_doi: bool,
    pub value: T,
}

impl<T> SourceMatch<T> {
    pub fn by_doi(value: T) -> Self {
        Self {
            matched_title: None,
            matched_year: None,
            via_doi: true,
            value,
        }
    }

    pub fn by_title(title: Option<String>, year: Option<i32>, value: T) -> Self {
        Self {
            matched_title: title,
            matched_year: year,
            via_doi: false,
            value,
        }
    }
}

/// Citation-metadata enrichment payload (CrossRef).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitationMetadata {
    pub citation_count: Option<u64>,
    pub has_funding_info: bool,
    pub doi: Option<String>,
    pub journal: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub author_count: Option<usize>,
    pub authors_with_affiliation: Option<usize>,
    /// Unique affiliation names, "; "-joined.
    pub affiliations: Option<String>,
}

impl CitationMetadata {
    /// Fraction of authors with complete affiliation data, in [0, 1].
    pub fn affiliation_quality(&self) -> Option<f64> {
        match (self.author_count, self.authors_with_affiliation) {
            (Some(total), Some(with_aff)) if total > 0 => {
                Some((with_aff as f64 / total as f64).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}
