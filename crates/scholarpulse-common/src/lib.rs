//! scholarpulse-common — Shared error taxonomy, HTTP sandbox, and settings
//! used across all Scholar Pulse crates.

pub mod error;
pub mod sandbox;
pub mod settings;

pub use error::{Result, ScholarPulseError};
pub use settings::Settings;
