//! scholarpulse-enrichment — Publication data model, collaborator traits and
//! clients, and the per-publication Enrichment Aggregator.

pub mod aggregator;
pub mod correlate;
pub mod models;
pub mod sources;

pub use aggregator::{enrich_publication, EnrichmentSources, FeatureRecord};
pub use models::{Publication, ScholarProfile, TriState};
