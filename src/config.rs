// src/config.rs
use std::env;
use std::time::Duration;

use crate::error::{Result, ScoutError};

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_SERPER_API_KEY: &str = "SERPER_API_KEY";

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

/// Runtime configuration, resolved once at startup from the environment.
/// Both secrets are mandatory; their absence is a ConfigurationError raised
/// before any network call is attempted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub serper_api_key: String,
    /// Model id used for all generation calls.
    pub model: String,
    /// Region code forwarded to the search provider ("gl").
    pub region: String,
    /// Number of categories requested per discovery run.
    pub category_count: usize,
    /// Number of articles requested per content run.
    pub article_count: usize,
    /// Whether scout links get a liveness check before being trusted.
    pub verify_links: bool,
    /// Bounded wait for the link verifier.
    pub verify_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = required_key(ENV_GEMINI_API_KEY)?;
        let serper_api_key = required_key(ENV_SERPER_API_KEY)?;

        let model = env::var("SCOUT_MODEL").unwrap_or_else(|_| default_model());
        let region = env::var("SCOUT_REGION")
            .unwrap_or_else(|_| "us".to_string())
            .to_lowercase();

        let category_count = env_usize("SCOUT_CATEGORY_COUNT", 6);
        let article_count = env_usize("SCOUT_ARTICLE_COUNT", 3);

        let verify_links = env::var("SCOUT_VERIFY_LINKS")
            .ok()
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        let verify_timeout = Duration::from_secs(env_usize("SCOUT_VERIFY_TIMEOUT_SECS", 4) as u64);

        Ok(Self {
            gemini_api_key,
            serper_api_key,
            model,
            region,
            category_count,
            article_count,
            verify_links,
            verify_timeout,
        })
    }
}

fn required_key(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ScoutError::Configuration(format!(
            "missing {name} env var"
        ))),
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
