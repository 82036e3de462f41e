//! scholarpulse-scorer — RIM scoring engine: normalisation functions, the
//! category weight table, and per-publication / aggregate score computation.

pub mod normalise;
pub mod scorer;
pub mod weights;

pub use scorer::{aggregate_rim, score_publication, RimBand, ScoredPublication, SubScores};
pub use weights::WeightTable;
