//! Credential and environment settings.
//!
//! Loaded once at startup from the environment (a `.env` file is honored via
//! dotenvy in the binary). Malformed or missing required values are fatal
//! configuration errors, never silently defaulted.

use chrono::Datelike;
use secrecy::SecretString;

use crate::error::{Result, ScholarPulseError};

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SerpAPI key for Google Scholar profile lookups.
    pub serpapi_key: SecretString,
    /// Email sent to Unpaywall's polite pool.
    pub unpaywall_email: String,
    /// Reference year used for citations-per-year computation.
    pub current_year: i32,
}

impl Settings {
    /// Resolve settings from the process environment.
    ///
    /// `SERPAPI_KEY` is required. `UNPAYWALL_EMAIL` falls back to a
    /// placeholder address, `CURRENT_YEAR` to the wall-clock year.
    pub fn from_env() -> Result<Self> {
        let serpapi_key = std::env::var("SERPAPI_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| {
                ScholarPulseError::Config("SERPAPI_KEY is not set".to_string())
            })?;

        let unpaywall_email = std::env::var("UNPAYWALL_EMAIL")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "you@example.com".to_string());

        let current_year = match std::env::var("CURRENT_YEAR") {
            Ok(raw) => raw.trim().parse::<i32>().map_err(|_| {
                ScholarPulseError::Config(format!("CURRENT_YEAR is not a year: '{raw}'"))
            })?,
            Err(_) => chrono::Utc::now().year(),
        };

        Ok(Self {
            serpapi_key,
            unpaywall_email,
            current_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    // Env-var tests mutate process state; keep them in one test to avoid
    // interference under the parallel test runner.
    #[test]
    fn test_from_env() {
        std::env::remove_var("SERPAPI_KEY");
        std::env::remove_var("UNPAYWALL_EMAIL");
        std::env::remove_var("CURRENT_YEAR");

        let err = Settings::from_env().unwrap_err();
        assert!(matches!(err, ScholarPulseError::Config(_)));

        std::env::set_var("SERPAPI_KEY", "test-key");
        std::env::set_var("CURRENT_YEAR", "2025");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.serpapi_key.expose_secret(), "test-key");
        assert_eq!(settings.unpaywall_email, "you@example.com");
        assert_eq!(settings.current_year, 2025);

        std::env::set_var("CURRENT_YEAR", "not-a-year");
        let err = Settings::from_env().unwrap_err();
        assert!(matches!(err, ScholarPulseError::Config(_)));

        std::env::remove_var("SERPAPI_KEY");
        std::env::remove_var("CURRENT_YEAR");
    }
}
