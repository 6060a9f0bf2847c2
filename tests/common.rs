#![allow(dead_code)]

use httpmock::MockServer;
use rawg_rs::core::client::{Backoff, RawgClientBuilder};
use rawg_rs::{RawgClient, RetryConfig};
use std::{fs, path::Path, time::Duration};
use url::Url;

pub const TEST_KEY: &str = "test-key";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.json"));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// Retries with a 1 ms fixed backoff so exhaustion tests stay fast.
pub fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryConfig::default()
    }
}

/// A builder pointed at `server` under `/api/`, no request spacing, fast retries, no cache.
pub fn builder_for(server: &MockServer) -> RawgClientBuilder {
    RawgClient::builder()
        .api_key(TEST_KEY)
        .base_url(Url::parse(&format!("{}/api/", server.base_url())).unwrap())
        .min_request_interval(Duration::ZERO)
        .retry_config(fast_retry(3))
}

pub fn client_for(server: &MockServer) -> RawgClient {
    builder_for(server).build().unwrap()
}

pub fn cached_client_for(server: &MockServer, ttl: Duration) -> RawgClient {
    builder_for(server).cache_ttl(ttl).build().unwrap()
}
