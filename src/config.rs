//! Environment-driven settings.
//!
//! [`Settings::from_env`] reads a `.env` file if one exists, then the process environment.
//! Unset keys keep their defaults; malformed values are configuration errors.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::assistant::{
    Assistant, DEFAULT_CHAT_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, OpenAiCompatibleBackend,
};
use crate::core::client::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_PAGE_SIZE, DEFAULT_MIN_REQUEST_INTERVAL_MS, DEFAULT_TIMEOUT_SECS,
};
use crate::core::client::{Backoff, RawgClientBuilder, RetryConfig};
use crate::core::{RawgClient, RawgError};

/// Runtime configuration for the client and the assistant.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rawg_api_key: Option<String>,
    pub rawg_base_url: String,
    pub rawg_user_agent: Option<String>,
    pub timeout_secs: u64,
    /// Total attempts per request, the first one included.
    pub max_retries: u32,
    /// Delay before the first retry; later retries double it.
    pub retry_delay_secs: f64,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,
    pub min_request_interval_ms: u64,
    pub max_page_size: u32,

    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_temperature: f32,
    pub groq_max_tokens: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rawg_api_key: None,
            rawg_base_url: DEFAULT_BASE_URL.to_string(),
            rawg_user_agent: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: 3,
            retry_delay_secs: 1.0,
            cache_ttl_secs: 3600,
            cache_max_entries: 100,
            min_request_interval_ms: DEFAULT_MIN_REQUEST_INTERVAL_MS,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            groq_api_key: None,
            groq_model: DEFAULT_CHAT_MODEL.to_string(),
            groq_temperature: DEFAULT_TEMPERATURE,
            groq_max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, RawgError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| RawgError::Config(format!("{key}={raw:?}: {e}")))
}

impl Settings {
    /// Loads `.env` (if present) and reads the `RAWG_*` / `GROQ_*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Config`] for values that do not parse.
    pub fn from_env() -> Result<Self, RawgError> {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!(error = %e, "no .env file loaded");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Config`] for values that do not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RawgError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut s = Self::default();

        s.rawg_api_key = get("RAWG_API_KEY").map(|v| v.trim().to_string());
        if let Some(v) = get("RAWG_BASE_URL") {
            s.rawg_base_url = v.trim().to_string();
        }
        s.rawg_user_agent = get("RAWG_USER_AGENT");
        if let Some(v) = get("RAWG_TIMEOUT_SECS") {
            s.timeout_secs = parse_var("RAWG_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("RAWG_MAX_RETRIES") {
            s.max_retries = parse_var("RAWG_MAX_RETRIES", &v)?;
        }
        if let Some(v) = get("RAWG_RETRY_DELAY_SECS") {
            s.retry_delay_secs = parse_var("RAWG_RETRY_DELAY_SECS", &v)?;
        }
        if let Some(v) = get("RAWG_CACHE_TTL_SECS") {
            s.cache_ttl_secs = parse_var("RAWG_CACHE_TTL_SECS", &v)?;
        }
        if let Some(v) = get("RAWG_CACHE_MAX_ENTRIES") {
            s.cache_max_entries = parse_var("RAWG_CACHE_MAX_ENTRIES", &v)?;
        }
        if let Some(v) = get("RAWG_MIN_REQUEST_INTERVAL_MS") {
            s.min_request_interval_ms = parse_var("RAWG_MIN_REQUEST_INTERVAL_MS", &v)?;
        }
        if let Some(v) = get("RAWG_MAX_PAGE_SIZE") {
            s.max_page_size = parse_var("RAWG_MAX_PAGE_SIZE", &v)?;
        }

        s.groq_api_key = get("GROQ_API_KEY").map(|v| v.trim().to_string());
        if let Some(v) = get("GROQ_MODEL") {
            s.groq_model = v.trim().to_string();
        }
        if let Some(v) = get("GROQ_TEMPERATURE") {
            s.groq_temperature = parse_var("GROQ_TEMPERATURE", &v)?;
        }
        if let Some(v) = get("GROQ_MAX_TOKENS") {
            s.groq_max_tokens = parse_var("GROQ_MAX_TOKENS", &v)?;
        }

        if !s.retry_delay_secs.is_finite() || s.retry_delay_secs < 0.0 {
            return Err(RawgError::Config(format!(
                "RAWG_RETRY_DELAY_SECS must be a non-negative number, got {}",
                s.retry_delay_secs
            )));
        }
        Ok(s)
    }

    /// The retry policy described by these settings.
    #[must_use]
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_retries.max(1),
            backoff: Backoff::doubling(Duration::from_secs_f64(self.retry_delay_secs)),
            ..RetryConfig::default()
        }
    }

    /// A client builder preloaded with these settings. A TTL of zero disables the cache.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Url`] for a malformed base URL.
    pub fn client_builder(&self) -> Result<RawgClientBuilder, RawgError> {
        let mut b = RawgClient::builder()
            .base_url(Url::parse(&self.rawg_base_url)?)
            .timeout(Duration::from_secs(self.timeout_secs))
            .retry_config(self.retry_config())
            .min_request_interval(Duration::from_millis(self.min_request_interval_ms))
            .max_page_size(self.max_page_size);
        if let Some(key) = &self.rawg_api_key {
            b = b.api_key(key.clone());
        }
        if let Some(ua) = &self.rawg_user_agent {
            b = b.user_agent(ua.clone());
        }
        if self.cache_ttl_secs > 0 {
            b = b
                .cache_ttl(Duration::from_secs(self.cache_ttl_secs))
                .cache_max_entries(self.cache_max_entries);
        }
        Ok(b)
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Config`] when `RAWG_API_KEY` is missing.
    pub fn client(&self) -> Result<RawgClient, RawgError> {
        self.client_builder()?.build()
    }

    /// The assistant, or an unavailable one when `GROQ_API_KEY` is unset or the backend
    /// cannot be built.
    #[must_use]
    pub fn assistant(&self) -> Assistant {
        let Some(key) = &self.groq_api_key else {
            tracing::info!("GROQ_API_KEY not set; assistant disabled");
            return Assistant::unavailable();
        };
        match OpenAiCompatibleBackend::new(key.clone()) {
            Ok(backend) => Assistant::new(Arc::new(
                backend
                    .model(self.groq_model.clone())
                    .temperature(self.groq_temperature)
                    .max_tokens(self.groq_max_tokens),
            )),
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize chat backend");
                Assistant::unavailable()
            }
        }
    }
}
