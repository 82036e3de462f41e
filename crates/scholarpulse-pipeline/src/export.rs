//! Report export: flat CSV (one row per publication) and JSON.

use std::path::Path;

use serde::Serialize;

use scholarpulse_common::{Result, ScholarPulseError};

use crate::report::ScholarReport;

/// One flat export row: profile fields, enrichment fields, sub-scores, RIM.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    scholar_name: &'a str,
    title: &'a str,
    journal: &'a str,
    volume: &'a str,
    issue: &'a str,
    year: Option<i32>,
    num_authors: Option<usize>,
    affiliations: &'a str,
    doi: &'a str,
    citations: Option<u64>,
    citations_per_year: f64,
    is_open_access: &'a str,
    funder_present: bool,
    author_affiliation_completeness: f64,
    is_retracted: &'a str,
    citation_score: f64,
    journal_quality_score: f64,
    data_availability_score: f64,
    relevance_score: f64,
    funding_score: f64,
    author_completeness_score: f64,
    peer_review_score: f64,
    rim_score: f64,
    risk_factor: f64,
    band: &'a str,
}

fn rows(report: &ScholarReport) -> Vec<ReportRow<'_>> {
    let scholar_name = report.scholar_name.as_deref().unwrap_or("");
    report
        .publications
        .iter()
        .map(|p| ReportRow {
            scholar_name,
            title: &p.record.title,
            journal: p.record.journal.as_deref().unwrap_or(""),
            volume: p.record.volume.as_deref().unwrap_or(""),
            issue: p.record.issue.as_deref().unwrap_or(""),
            year: p.record.year,
            num_authors: p.record.author_count,
            affiliations: p.record.affiliations.as_deref().unwrap_or("N/A"),
            doi: p.record.doi.as_deref().unwrap_or(""),
            citations: p.record.citation_count,
            citations_per_year: p.citations_per_year,
            is_open_access: p.record.is_open_access.as_str(),
            funder_present: p.record.has_funding_info,
            author_affiliation_completeness: p.record.affiliation_quality,
            is_retracted: p.record.is_retracted.as_str(),
            citation_score: p.sub_scores.citations,
            journal_quality_score: p.sub_scores.journal_quality,
            data_availability_score: p.sub_scores.data_availability,
            relevance_score: p.sub_scores.relevance,
            funding_score: p.sub_scores.funding,
            author_completeness_score: p.sub_scores.author_completeness,
            peer_review_score: p.sub_scores.peer_review,
            rim_score: p.rim_score,
            risk_factor: p.risk_factor,
            band: p.band.as_str(),
        })
        .collect()
}

/// Serialize the report to CSV, one row per publication.
pub fn to_csv_string(report: &ScholarReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows(report) {
        writer
            .serialize(row)
            .map_err(|e| ScholarPulseError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ScholarPulseError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ScholarPulseError::Export(e.to_string()))
}

/// Write the CSV export artifact to disk.
pub fn write_csv(report: &ScholarReport, path: &Path) -> Result<()> {
    let csv = to_csv_string(report)?;
    std::fs::write(path, csv).map_err(|e| {
        ScholarPulseError::Export(format!("cannot write {}: {e}", path.display()))
    })
}

/// Serialize the whole report to pretty JSON.
pub fn to_json_string(report: &ScholarReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Default export file stem: `<scholar_name>_rim_analysis`, spaces
/// underscored; falls back to the scholar identifier.
pub fn default_export_stem(report: &ScholarReport) -> String {
    let base = report
        .scholar_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(&report.scholar_id);
    format!("{}_rim_analysis", base.trim().replace(' ', "_"))
}
