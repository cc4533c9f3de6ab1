use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which hosted completion API backs the advice generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionProvider {
    OpenAi,
    Anthropic,
}

impl CompletionProvider {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => bail!("COMPLETION_PROVIDER must be 'openai' or 'anthropic', got '{other}'"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Start-up fails if the selected provider's API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: CompletionProvider,
    pub api_key: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// `None` means requests wait for the provider indefinitely.
    pub request_timeout: Option<Duration>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            optional(key)
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let provider = match optional("COMPLETION_PROVIDER") {
            Some(raw) => CompletionProvider::parse(&raw)?,
            None => CompletionProvider::OpenAi,
        };

        let api_key = match provider {
            CompletionProvider::OpenAi => required("OPENAI_API_KEY")?,
            CompletionProvider::Anthropic => required("ANTHROPIC_API_KEY")?,
        };

        let request_timeout = optional("COMPLETION_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .context("COMPLETION_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        let port = match optional("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => 8080,
        };

        Ok(Config {
            provider,
            api_key,
            model: optional("COMPLETION_MODEL"),
            base_url: optional("COMPLETION_BASE_URL"),
            request_timeout,
            port,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
