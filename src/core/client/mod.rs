//! Public client surface + builder.
//! Internals are split into `retry` (backoff policy), `rate_limit` (request spacing) and
//! `constants` (UA + defaults).

pub(crate) mod constants;
pub mod rate_limit;
pub mod retry;

pub use rate_limit::RateLimiter;
pub use retry::{Backoff, CacheMode, RetryAttempt, RetryConfig, retry_with_backoff};

use crate::core::cache::{CacheKey, ResponseCache};
use crate::core::endpoint::Endpoint;
use crate::core::net::{self, ApiResponse};
use crate::core::{QueryParams, RawgError};
use constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_PAGE_SIZE, DEFAULT_MIN_REQUEST_INTERVAL_MS,
    DEFAULT_TIMEOUT_SECS, USER_AGENT,
};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Handle to the RAWG API.
///
/// Cloning is cheap: clones share the HTTP connection pool, the response cache and the rate
/// limiter, so one client built at startup can be handed to every caller.
#[derive(Clone)]
pub struct RawgClient {
    http: Client,
    base_url: Url,
    api_key: Arc<str>,
    retry: RetryConfig,
    limiter: Arc<RateLimiter>,
    cache: Option<Arc<ResponseCache<ApiResponse>>>,
    max_page_size: u32,
}

impl fmt::Debug for RawgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawgClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("retry", &self.retry)
            .field("min_request_interval", &self.limiter.min_interval())
            .field("cache_ttl", &self.cache.as_ref().map(|c| c.ttl()))
            .field("max_page_size", &self.max_page_size)
            .finish_non_exhaustive()
    }
}

impl RawgClient {
    /// Create a new builder.
    pub fn builder() -> RawgClientBuilder {
        RawgClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }
    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The page size ceiling applied to every list query.
    #[must_use]
    pub const fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// The client-wide retry policy.
    #[must_use]
    pub const fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Drops every cached response.
    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear().await;
        }
    }

    /// Fetches any endpoint, composing cache, retry, rate limiter and executor.
    ///
    /// # Errors
    ///
    /// Returns a [`RawgError`] on throttling or transport failure once retries are exhausted,
    /// on any other unsuccessful status, or when the URL cannot be built. A 404 is returned as
    /// [`ApiResponse::NotFound`], never as an error.
    pub async fn fetch(
        &self,
        endpoint: &Endpoint,
        params: &QueryParams,
        cache_mode: CacheMode,
        retry_override: Option<&RetryConfig>,
    ) -> Result<ApiResponse, RawgError> {
        let path = endpoint.path();
        let cache = match (&self.cache, cache_mode) {
            (Some(c), CacheMode::Use | CacheMode::Refresh) => c,
            _ => return self.send_with_retry(&path, params, retry_override).await,
        };

        let key = CacheKey::new(path.as_str(), params);
        if cache_mode == CacheMode::Use {
            return cache
                .get_or_compute(key, || self.send_with_retry(&path, params, retry_override))
                .await;
        }

        let fresh = self.send_with_retry(&path, params, retry_override).await?;
        cache.put(key, fresh.clone()).await;
        Ok(fresh)
    }

    pub(crate) async fn send_with_retry(
        &self,
        path: &str,
        params: &QueryParams,
        retry_override: Option<&RetryConfig>,
    ) -> Result<ApiResponse, RawgError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        retry_with_backoff(
            cfg,
            move || async move {
                self.limiter.acquire().await;
                net::execute(self, path, params).await
            },
            |a| {
                tracing::warn!(
                    path,
                    attempt = a.attempt,
                    delay = ?a.delay,
                    error = %a.error,
                    "request failed, retrying"
                );
            },
        )
        .await
        .inspect_err(|e| {
            if e.is_transient() {
                tracing::error!(path, error = %e, "request failed after retries");
            }
        })
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct RawgClientBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    user_agent: Option<String>,
    custom_client: Option<Client>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_config: Option<RetryConfig>,
    cache_ttl: Option<Duration>,
    cache_max_entries: Option<usize>,
    min_request_interval: Option<Duration>,
    max_page_size: Option<u32>,
}

impl RawgClientBuilder {
    /// The API key sent as the `key` query parameter. Required.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base (default `https://api.rawg.io/api/`).
    /// A missing trailing slash is added so resource paths join underneath it.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom TLS). Timeout and
    /// User-Agent settings on this builder are then ignored.
    #[must_use]
    pub fn custom_client(mut self, client: Client) -> Self {
        self.custom_client = Some(client);
        self
    }

    /// Set a global request timeout (overall). Default: 30 seconds.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Replace the default retry policy.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry_config = Some(cfg);
        self
    }

    /// Toggle retries without replacing the rest of the policy.
    #[must_use]
    pub fn retry_enabled(mut self, enabled: bool) -> Self {
        let mut cfg = self.retry_config.take().unwrap_or_default();
        cfg.enabled = enabled;
        self.retry_config = Some(cfg);
        self
    }

    /// Enable in-memory caching with a default TTL.
    /// If not set, caching is disabled.
    #[must_use]
    pub const fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Bound the number of cached responses; the oldest entry is evicted first.
    #[must_use]
    pub const fn cache_max_entries(mut self, n: usize) -> Self {
        self.cache_max_entries = Some(n);
        self
    }

    /// Minimum spacing between outbound requests. Default: 100 ms. `Duration::ZERO` disables it.
    #[must_use]
    pub const fn min_request_interval(mut self, dur: Duration) -> Self {
        self.min_request_interval = Some(dur);
        self
    }

    /// Ceiling for `page_size` on list queries. Default: 40.
    #[must_use]
    pub const fn max_page_size(mut self, n: u32) -> Self {
        self.max_page_size = Some(n);
        self
    }

    /// # Errors
    ///
    /// Returns [`RawgError::Config`] when no non-blank API key was provided, or an HTTP/URL
    /// error if the underlying client cannot be built.
    pub fn build(self) -> Result<RawgClient, RawgError> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| RawgError::Config("an API key is required".into()))?;

        let mut base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = match self.custom_client {
            Some(c) => c,
            None => {
                let mut httpb = reqwest::Client::builder()
                    .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
                    .timeout(
                        self.timeout
                            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
                    );
                if let Some(ct) = self.connect_timeout {
                    httpb = httpb.connect_timeout(ct);
                }
                httpb
                    .build()
                    .map_err(|e| RawgError::Config(format!("http client: {e}")))?
            }
        };

        let min_interval = self
            .min_request_interval
            .unwrap_or(Duration::from_millis(DEFAULT_MIN_REQUEST_INTERVAL_MS));

        Ok(RawgClient {
            http,
            base_url,
            api_key: Arc::from(api_key),
            retry: self.retry_config.unwrap_or_default(),
            limiter: Arc::new(RateLimiter::new(min_interval)),
            cache: self
                .cache_ttl
                .map(|ttl| Arc::new(ResponseCache::new(ttl, self.cache_max_entries))),
            max_page_size: self.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE).max(1),
        })
    }
}
