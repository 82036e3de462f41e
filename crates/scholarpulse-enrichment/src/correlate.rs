//! Cross-source record correlation.
//!
//! Records from independent sources are matched on normalised title plus
//! publication year. Two records that do not correlate are never merged —
//! a wrong merge would corrupt citation counts, so the unknown state is
//! preferred over a guess.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// DOI pattern per the CrossRef recommendation.
    pub static ref DOI_RE: Regex = Regex::new(r"(?i)10\.\d{4,9}/\S+").unwrap();
}

/// Extract the first DOI found in a free-text field, if any.
pub fn extract_doi(text: &str) -> Option<String> {
    DOI_RE
        .find(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';']).to_string())
}

/// Lowercase and collapse all whitespace runs to single spaces.
pub fn normalise_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a candidate record from a title search refers to the same
/// publication as the base record.
///
/// Titles must be equal after normalisation. Years must agree when both are
/// known; a candidate without a year is accepted on title alone (year data is
/// patchy across providers, and the title namespace within one scholar's
/// publication set is effectively unique).
pub fn same_publication(
    base_title: &str,
    base_year: Option<i32>,
    candidate_title: Option<&str>,
    candidate_year: Option<i32>,
) -> bool {
    let Some(cand) = candidate_title else {
        return false;
    };
    if normalise_title(base_title) != normalise_title(cand) {
        return false;
    }
    match (base_year, candidate_year) {
        (Some(b), Some(c)) => b == c,
        _ => true,
    }
}
