//! Developers, publishers, platforms, genres, tags, creators and stores.
//!
//! These resources share one shape: a paginated list of named entries and a detail view per id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::endpoint::{Endpoint, resource_id};
use crate::core::net::results_of;
use crate::core::wire::PageMeta;
use crate::core::{CacheMode, ListQuery, QueryParams, RawgClient, RawgError, RetryConfig};
use crate::games::Page;

/// The catalog resources exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Developers,
    Publishers,
    Platforms,
    Genres,
    Tags,
    Creators,
    Stores,
}

impl CatalogKind {
    const fn list_endpoint(self) -> Endpoint {
        match self {
            Self::Developers => Endpoint::Developers,
            Self::Publishers => Endpoint::Publishers,
            Self::Platforms => Endpoint::Platforms,
            Self::Genres => Endpoint::Genres,
            Self::Tags => Endpoint::Tags,
            Self::Creators => Endpoint::Creators,
            Self::Stores => Endpoint::Stores,
        }
    }

    fn detail_endpoint(self, id: String) -> Endpoint {
        match self {
            Self::Developers => Endpoint::Developer(id),
            Self::Publishers => Endpoint::Publisher(id),
            Self::Platforms => Endpoint::Platform(id),
            Self::Genres => Endpoint::Genre(id),
            Self::Tags => Endpoint::Tag(id),
            Self::Creators => Endpoint::Creator(id),
            Self::Stores => Endpoint::Store(id),
        }
    }
}

/// A named catalog entry (a developer, a genre, a platform...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub games_count: Option<u64>,
    #[serde(default)]
    pub image_background: Option<String>,
}

fn entry_page(value: &Value) -> Page<CatalogEntry> {
    let meta: PageMeta = serde_json::from_value(value.clone()).unwrap_or_default();
    let results = results_of(value, "catalog")
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value::<CatalogEntry>(item)
                .inspect_err(|e| tracing::warn!(error = %e, "skipping malformed catalog entry"))
                .ok()
        })
        .collect();
    Page {
        count: meta.count,
        next: meta.next,
        previous: meta.previous,
        results,
    }
}

/* ---------------- Raw façade ---------------- */

impl RawgClient {
    async fn list_raw(&self, endpoint: Endpoint, query: &ListQuery) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(endpoint, &params).await
    }

    async fn detail_raw(&self, kind: CatalogKind, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.raw(kind.detail_endpoint(resource_id(id)?), &QueryParams::new())
            .await
    }

    /// # Errors
    ///
    /// Returns an error for invalid parameters, or throttling/transport failures after retries.
    pub async fn developers(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::Developers, query).await
    }

    /// # Errors
    ///
    /// Returns an error for an invalid id, or throttling/transport failures after retries.
    pub async fn developer_details(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.detail_raw(CatalogKind::Developers, id).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developers`].
    pub async fn publishers(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::Publishers, query).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developer_details`].
    pub async fn publisher_details(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.detail_raw(CatalogKind::Publishers, id).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developers`].
    pub async fn platforms(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::Platforms, query).await
    }

    /// Platform families (PC, PlayStation, Xbox...) with their member platforms.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::developers`].
    pub async fn parent_platforms(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::ParentPlatforms, query).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developer_details`].
    pub async fn platform_details(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.detail_raw(CatalogKind::Platforms, id).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developers`].
    pub async fn genres(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::Genres, query).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developer_details`].
    pub async fn genre_details(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.detail_raw(CatalogKind::Genres, id).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developers`].
    pub async fn tags(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::Tags, query).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developer_details`].
    pub async fn tag_details(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.detail_raw(CatalogKind::Tags, id).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developers`].
    pub async fn creators(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::Creators, query).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developer_details`].
    pub async fn creator_details(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.detail_raw(CatalogKind::Creators, id).await
    }

    /// Positions a creator can hold (writer, composer...).
    ///
    /// # Errors
    ///
    /// See [`RawgClient::developers`].
    pub async fn creator_roles(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::CreatorRoles, query).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developers`].
    pub async fn stores(&self, query: &ListQuery) -> Result<Value, RawgError> {
        self.list_raw(Endpoint::Stores, query).await
    }

    /// # Errors
    ///
    /// See [`RawgClient::developer_details`].
    pub async fn store_details(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.detail_raw(CatalogKind::Stores, id).await
    }
}

/* ---------------- Typed builder ---------------- */

/// A builder for catalog lists, decoding entries into [`CatalogEntry`].
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    client: RawgClient,
    kind: CatalogKind,
    query: ListQuery,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl CatalogBuilder {
    pub fn new(client: &RawgClient, kind: CatalogKind) -> Self {
        Self {
            client: client.clone(),
            kind,
            query: ListQuery::new(),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    #[must_use]
    pub fn query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    /// # Errors
    ///
    /// Returns an error for invalid parameters, or throttling/transport failures after retries.
    pub async fn fetch(&self) -> Result<Page<CatalogEntry>, RawgError> {
        let params = self.query.to_params(self.client.max_page_size())?;
        let v = self
            .client
            .fetch(
                &self.kind.list_endpoint(),
                &params,
                self.cache_mode,
                self.retry_override.as_ref(),
            )
            .await?
            .into_value();
        Ok(entry_page(&v))
    }

    /// Fetches one entry of this kind; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid id, or throttling/transport failures after retries.
    pub async fn detail(&self, id: impl std::fmt::Display) -> Result<Option<CatalogEntry>, RawgError> {
        let endpoint = self.kind.detail_endpoint(resource_id(id)?);
        let resp = self
            .client
            .fetch(
                &endpoint,
                &QueryParams::new(),
                self.cache_mode,
                self.retry_override.as_ref(),
            )
            .await?;
        if resp.is_not_found() {
            return Ok(None);
        }
        Ok(serde_json::from_value::<CatalogEntry>(resp.into_value())
            .inspect_err(|e| tracing::warn!(error = %e, "catalog detail has unexpected shape"))
            .ok())
    }
}
