use std::fmt;

use anyhow::{Context, Result};

use crate::llm_client::{GROQ_API_URL, MODEL};

/// Application configuration loaded from environment variables.
///
/// The provider credential is optional at start-up: a missing key degrades
/// every generation request to a configuration error instead of crashing.
#[derive(Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub model: String,
    pub port: u16,
    pub rust_log: String,
    pub provider_max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_api_url: optional_env("GROQ_API_URL").unwrap_or_else(|| GROQ_API_URL.to_string()),
            model: optional_env("GROQ_MODEL").unwrap_or_else(|| MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            provider_max_retries: std::env::var("PROVIDER_MAX_RETRIES")
                .unwrap_or_else(|_| "0".to_string())
                .parse::<u32>()
                .context("PROVIDER_MAX_RETRIES must be a non-negative integer")?,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.groq_api_key.is_some()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .field("groq_api_url", &self.groq_api_url)
            .field("model", &self.model)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("provider_max_retries", &self.provider_max_retries)
            .finish()
    }
}

/// Reads an environment variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: no environment access, default endpoint.
    pub fn for_tests(api_key: Option<&str>) -> Self {
        Config {
            groq_api_key: api_key.map(str::to_string),
            groq_api_url: GROQ_API_URL.to_string(),
            model: MODEL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            provider_max_retries: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_credential() {
        let config = Config::for_tests(Some("gsk_secret_value"));
        let printed = format!("{config:?}");
        assert!(!printed.contains("gsk_secret_value"));
        assert!(printed.contains("<redacted>"));
        assert!(config.has_api_key());
        assert!(!Config::for_tests(None).has_api_key());
    }
}
