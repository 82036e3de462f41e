//! scholarpulse-pipeline — Pipeline Orchestrator: drives profile fetch,
//! per-publication enrichment fan-out, scoring, and report assembly.

pub mod export;
pub mod pipeline;
pub mod report;

pub use pipeline::{analyze, select_top_publications, AnalysisJob};
pub use report::ScholarReport;
