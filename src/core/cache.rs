//! In-memory response cache with TTL expiry and an optional FIFO entry bound.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::core::params::QueryParams;

/// Identifies a cached response: endpoint path plus canonical (sorted) parameters.
///
/// The API key is never part of the key; it is injected by the executor after the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    endpoint: String,
    params: String,
}

impl CacheKey {
    /// Builds a key from an endpoint path and its parameters.
    pub fn new(endpoint: impl Into<String>, params: &QueryParams) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: params.canonical(),
        }
    }

    /// The endpoint path component.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

#[derive(Debug)]
struct Store<V> {
    map: HashMap<CacheKey, Entry<V>>,
    order: VecDeque<CacheKey>,
}

/// Memoizes successful results for a bounded time.
///
/// Reads take a shared lock and writes an exclusive one, so concurrent callers never observe a
/// half-written entry. Failed computations are never stored.
#[derive(Debug)]
pub struct ResponseCache<V> {
    store: RwLock<Store<V>>,
    ttl: Duration,
    max_entries: Option<usize>,
}

impl<V: Clone> ResponseCache<V> {
    /// Creates a cache whose entries live for `ttl`, holding at most `max_entries` if given.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: Option<usize>) -> Self {
        Self {
            store: RwLock::new(Store {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
            ttl,
            max_entries: max_entries.filter(|n| *n > 0),
        }
    }

    /// The configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a clone of the cached value if present and younger than the TTL.
    pub async fn get(&self, key: &CacheKey) -> Option<V> {
        let guard = self.store.read().await;
        guard
            .map
            .get(key)
            .filter(|e| e.stored_at.elapsed() < self.ttl)
            .map(|e| e.value.clone())
    }

    /// Stores `value` under `key`, overwriting any previous entry.
    pub async fn put(&self, key: CacheKey, value: V) {
        let mut guard = self.store.write().await;
        let Store { map, order } = &mut *guard;

        let ttl = self.ttl;
        map.retain(|_, e| e.stored_at.elapsed() < ttl);
        order.retain(|k| map.contains_key(k) && *k != key);

        map.insert(
            key.clone(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
        order.push_back(key);

        if let Some(max) = self.max_entries {
            while order.len() > max {
                if let Some(oldest) = order.pop_front() {
                    tracing::debug!(endpoint = oldest.endpoint(), "evicting cached response");
                    map.remove(&oldest);
                }
            }
        }
    }

    /// Returns the cached value or runs `compute`, caching its result only if it succeeds.
    ///
    /// # Errors
    ///
    /// Propagates the error of `compute` unchanged; nothing is cached in that case.
    pub async fn get_or_compute<F, Fut, E>(&self, key: CacheKey, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(&key).await {
            tracing::trace!(endpoint = key.endpoint(), "cache hit");
            return Ok(hit);
        }
        let value = compute().await?;
        self.put(key, value.clone()).await;
        Ok(value)
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        let mut guard = self.store.write().await;
        guard.map.clear();
        guard.order.clear();
    }

    /// Number of stored entries, including ones that have expired but not been purged yet.
    pub async fn len(&self) -> usize {
        self.store.read().await.map.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
