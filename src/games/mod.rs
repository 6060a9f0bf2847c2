mod model;
mod wire;

pub use model::{Achievement, GameDetail, GameSummary, Page, Screenshot};

use serde_json::Value;

use crate::core::endpoint::{Endpoint, resource_id};
use crate::core::{CacheMode, GamesQuery, ListQuery, QueryParams, RawgClient, RawgError, RetryConfig};

/* ---------------- Raw façade: one method per resource ---------------- */

impl RawgClient {
    pub(crate) async fn raw(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value, RawgError> {
        Ok(self
            .fetch(&endpoint, params, CacheMode::Use, None)
            .await?
            .into_value())
    }

    /// Lists games matching `query`, as returned by `/games`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid parameters, or throttling/transport failures after retries.
    #[tracing::instrument(skip(self), err)]
    pub async fn games(&self, query: &GamesQuery) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(Endpoint::Games, &params).await
    }

    /// Details of one game by id or slug. `{}` when the game does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid id, or throttling/transport failures after retries.
    #[tracing::instrument(skip_all, err, fields(id = %id))]
    pub async fn game_details(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.raw(Endpoint::Game(resource_id(id)?), &QueryParams::new()).await
    }

    /// Screenshots of a game.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_screenshots(
        &self,
        id: impl std::fmt::Display,
        query: &ListQuery,
    ) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(Endpoint::GameScreenshots(resource_id(id)?), &params).await
    }

    /// Trailers of a game.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_movies(&self, id: impl std::fmt::Display) -> Result<Value, RawgError> {
        self.raw(Endpoint::GameMovies(resource_id(id)?), &QueryParams::new()).await
    }

    /// Achievements of a game.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_achievements(
        &self,
        id: impl std::fmt::Display,
        query: &ListQuery,
    ) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(Endpoint::GameAchievements(resource_id(id)?), &params).await
    }

    /// Store links for a game.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_stores(&self, id: impl std::fmt::Display, query: &ListQuery) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(Endpoint::GameStores(resource_id(id)?), &params).await
    }

    /// Other games of the same series.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_series(&self, id: impl std::fmt::Display, query: &ListQuery) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(Endpoint::GameSeries(resource_id(id)?), &params).await
    }

    /// DLCs, editions and other additions of a game.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_additions(&self, id: impl std::fmt::Display, query: &ListQuery) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(Endpoint::GameAdditions(resource_id(id)?), &params).await
    }

    /// Games this one is an addition to.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_parent_games(
        &self,
        id: impl std::fmt::Display,
        query: &ListQuery,
    ) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(Endpoint::GameParentGames(resource_id(id)?), &params).await
    }

    /// People credited on a game.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_development_team(
        &self,
        id: impl std::fmt::Display,
        query: &ListQuery,
    ) -> Result<Value, RawgError> {
        let params = query.to_params(self.max_page_size())?;
        self.raw(Endpoint::GameDevelopmentTeam(resource_id(id)?), &params)
            .await
    }

    /* ---------------- Typed convenience ---------------- */

    /// Lists games matching `query` as typed summaries.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::games`].
    pub async fn game_summaries(&self, query: &GamesQuery) -> Result<Page<GameSummary>, RawgError> {
        GamesBuilder::from_query(self, query.clone()).fetch().await
    }

    /// Typed details of one game; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn game_detail(&self, id: impl std::fmt::Display) -> Result<Option<GameDetail>, RawgError> {
        Game::new(self, id).details().await
    }

    /// Typed screenshots of a game.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn screenshots(&self, id: impl std::fmt::Display) -> Result<Vec<Screenshot>, RawgError> {
        Game::new(self, id).screenshots().await
    }

    /// Typed achievements of a game, with non-numeric percentages normalized to `None`.
    ///
    /// # Errors
    ///
    /// See [`RawgClient::game_details`].
    pub async fn achievements(&self, id: impl std::fmt::Display) -> Result<Vec<Achievement>, RawgError> {
        Game::new(self, id).achievements().await
    }
}

/* ---------------- Builders ---------------- */

/// A builder for the games list with per-call cache and retry overrides.
#[derive(Debug, Clone)]
pub struct GamesBuilder {
    client: RawgClient,
    query: GamesQuery,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl GamesBuilder {
    /// Starts an unfiltered games query.
    pub fn new(client: &RawgClient) -> Self {
        Self::from_query(client, GamesQuery::new())
    }

    /// Starts from an existing query.
    pub fn from_query(client: &RawgClient, query: GamesQuery) -> Self {
        Self {
            client: client.clone(),
            query,
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

    /// Edits the underlying query in place.
    #[must_use]
    pub fn query(mut self, f: impl FnOnce(GamesQuery) -> GamesQuery) -> Self {
        self.query = f(self.query);
        self
    }

    /// Executes the request and returns the raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid parameters, or throttling/transport failures after retries.
    pub async fn fetch_raw(&self) -> Result<Value, RawgError> {
        let params = self.query.to_params(self.client.max_page_size())?;
        Ok(self
            .client
            .fetch(
                &Endpoint::Games,
                &params,
                self.cache_mode,
                self.retry_override.as_ref(),
            )
            .await?
            .into_value())
    }

    /// Executes the request and decodes the page.
    ///
    /// # Errors
    ///
    /// See [`GamesBuilder::fetch_raw`].
    pub async fn fetch(&self) -> Result<Page<GameSummary>, RawgError> {
        Ok(model::game_page(&self.fetch_raw().await?))
    }
}

/// A single game, addressed by id or slug, with typed accessors for its sub-resources.
#[derive(Debug, Clone)]
pub struct Game {
    client: RawgClient,
    id: String,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl Game {
    /// Creates a handle; the id is validated on first use.
    pub fn new(client: &RawgClient, id: impl std::fmt::Display) -> Self {
        Self {
            client: client.clone(),
            id: id.to_string(),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the cache mode for all subsequent API calls made by this handle.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the client's default retry policy for this handle.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    async fn get(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Value, RawgError> {
        Ok(self
            .client
            .fetch(&endpoint, params, self.cache_mode, self.retry_override.as_ref())
            .await?
            .into_value())
    }

    fn rid(&self) -> Result<String, RawgError> {
        resource_id(&self.id)
    }

    /// # Errors
    ///
    /// Returns an error for an invalid id, or throttling/transport failures after retries.
    #[tracing::instrument(skip(self), err, fields(id = %self.id))]
    pub async fn details(&self) -> Result<Option<GameDetail>, RawgError> {
        let v = self.get(Endpoint::Game(self.rid()?), &QueryParams::new()).await?;
        Ok(model::game_detail(v))
    }

    /// # Errors
    ///
    /// See [`Game::details`].
    pub async fn screenshots(&self) -> Result<Vec<Screenshot>, RawgError> {
        let params = ListQuery::new()
            .page_size(self.client.max_page_size())
            .to_params(self.client.max_page_size())?;
        let v = self.get(Endpoint::GameScreenshots(self.rid()?), &params).await?;
        Ok(model::screenshots(&v, &self.id))
    }

    /// # Errors
    ///
    /// See [`Game::details`].
    pub async fn achievements(&self) -> Result<Vec<Achievement>, RawgError> {
        let params = ListQuery::new()
            .page_size(self.client.max_page_size())
            .to_params(self.client.max_page_size())?;
        let v = self.get(Endpoint::GameAchievements(self.rid()?), &params).await?;
        Ok(model::achievements(&v, &self.id))
    }

    /// Games of the same series as typed summaries.
    ///
    /// # Errors
    ///
    /// See [`Game::details`].
    pub async fn series(&self) -> Result<Page<GameSummary>, RawgError> {
        let v = self.get(Endpoint::GameSeries(self.rid()?), &QueryParams::new()).await?;
        Ok(model::game_page(&v))
    }

    /// Additions (DLCs, editions) as typed summaries.
    ///
    /// # Errors
    ///
    /// See [`Game::details`].
    pub async fn additions(&self) -> Result<Page<GameSummary>, RawgError> {
        let v = self.get(Endpoint::GameAdditions(self.rid()?), &QueryParams::new()).await?;
        Ok(model::game_page(&v))
    }
}
