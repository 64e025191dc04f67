use anyhow::{Context, Result};

use crate::llm_client::Provider;

/// Submission port; the mailer upgrades it with STARTTLS.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub llm: LlmConfig,
    pub rate_limit: RateLimitConfig,
    pub smtp: Option<SmtpConfig>,
    pub port: u16,
    pub rust_log: String,
}

/// Text-generation backend selection. Endpoint and model fall back to
/// the provider's defaults when unset.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u64,
    pub window_secs: u64,
    /// Key clients on the first `X-Forwarded-For` hop. Only safe behind a
    /// proxy that overwrites the header.
    pub trust_proxy: bool,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            llm: LlmConfig::from_env()?,
            rate_limit: RateLimitConfig {
                max_requests: parse_env("RATE_LIMIT_MAX", 100)?,
                window_secs: parse_env("RATE_LIMIT_WINDOW_SECS", 15 * 60)?,
                trust_proxy: parse_env("TRUST_PROXY", false)?,
            },
            smtp: SmtpConfig::from_env()?,
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl LlmConfig {
    fn from_env() -> Result<Self> {
        let provider: Provider = optional_env("LLM_PROVIDER")
            .as_deref()
            .unwrap_or("ollama")
            .parse()?;

        Ok(LlmConfig {
            endpoint: optional_env("LLM_ENDPOINT")
                .unwrap_or_else(|| provider.default_endpoint().to_string()),
            model: optional_env("LLM_MODEL")
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_key: optional_env("LLM_API_KEY"),
            provider,
        })
    }
}

impl SmtpConfig {
    /// Mail is optional: without `SMTP_HOST` the contact endpoint skips sending.
    fn from_env() -> Result<Option<Self>> {
        let Some(host) = optional_env("SMTP_HOST") else {
            return Ok(None);
        };

        Ok(Some(SmtpConfig {
            host,
            port: parse_env("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            user: require_env("SMTP_USER")?,
            pass: require_env("SMTP_PASS")?,
            from: require_env("MAIL_FROM")?,
        }))
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
