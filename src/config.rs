//! Runtime configuration
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file). The API key read here is only a fallback: an explicit key passed to
//! [`crate::adapter::RequestAdapter::process`] always wins.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub output_root: PathBuf,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = match non_empty("GEMINI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        Error::Configuration(format!(
                            "GEMINI_TIMEOUT_SECS must be a positive whole number of seconds, got '{}'",
                            raw
                        ))
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            gemini_api_key: non_empty(API_KEY_VAR),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            output_root: non_empty("NANO_BANANA_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            timeout,
        })
    }
}

/// Pick the credential for a request.
///
/// Precedence is explicit value, then fallback, then a configuration error.
/// Both inputs are trimmed and blank values count as absent.
pub fn resolve_api_key(explicit: Option<&str>, fallback: Option<&str>) -> Result<String> {
    [explicit, fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Configuration(format!(
                "Gemini API key not provided (set {} or pass an explicit key)",
                API_KEY_VAR
            ))
        })
}
