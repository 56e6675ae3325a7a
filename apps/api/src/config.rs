use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; missing credentials switch the service to its fallback paths.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the text-generation collaborator. `None` means every
    /// analysis and evaluation takes the deterministic fallback branch.
    pub anthropic_api_key: Option<String>,
    /// When set, interview sessions live in Redis instead of process memory.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    /// Seed for the sample-analysis generator. Unset means entropy-seeded.
    pub analysis_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            redis_url: optional_env("REDIS_URL"),
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            analysis_seed: optional_env("ANALYSIS_SEED")
                .map(|raw| {
                    raw.parse::<u64>()
                        .context("ANALYSIS_SEED must be an unsigned integer")
                })
                .transpose()?,
        })
    }

    pub fn llm_configured(&self) -> bool {
        self.anthropic_api_key.is_some()
    }
}

/// Reads a variable, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration with no collaborator and in-memory sessions.
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: None,
            redis_url: None,
            port: 0,
            rust_log: "debug".to_string(),
            llm_timeout_secs: 5,
            analysis_seed: Some(7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_configured_follows_api_key() {
        let mut config = Config::for_tests();
        assert!(!config.llm_configured());
        config.anthropic_api_key = Some("sk-test".to_string());
        assert!(config.llm_configured());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("SCREENER_TEST_UNSET_PORT_VARIABLE", 8080).unwrap();
        assert_eq!(value, 8080);
    }
}
