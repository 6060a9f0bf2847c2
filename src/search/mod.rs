//! Text search, best-match lookup and curated popular/trending lists.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rapidfuzz::distance::jaro_winkler;

use crate::core::{CacheMode, DateRange, GamesQuery, Ordering, RawgClient, RawgError, RetryConfig};
use crate::games::{GameSummary, GamesBuilder, Page};

/// Number of candidates fetched when looking for a best match.
pub const BEST_MATCH_CANDIDATES: u32 = 10;

/// Jaro-Winkler similarity a candidate must exceed to win on closeness alone.
pub const SIMILARITY_CUTOFF: f64 = 0.80;

/// Default page size of the trending list.
pub const TRENDING_PAGE_SIZE: u32 = 20;

/// Look-back window for [`popular_games`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePeriod {
    #[default]
    Week,
    Month,
    Year,
}

impl TimePeriod {
    #[must_use]
    pub const fn days(self) -> u64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }

    /// Parses a period name, falling back to [`TimePeriod::Week`] for anything unrecognized.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = RawgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(RawgError::InvalidParams(format!("unknown time period: {other}"))),
        }
    }
}

/// Picks the best candidate for `query` among `names`.
///
/// A case-insensitive exact name wins outright. Otherwise the closest name by
/// Jaro-Winkler similarity wins if it exceeds [`SIMILARITY_CUTOFF`], and the first
/// candidate is the fallback. `None` only when `names` is empty.
#[must_use]
pub fn best_match_index(query: &str, names: &[&str]) -> Option<usize> {
    if names.is_empty() {
        return None;
    }
    let q = query.trim().to_lowercase();

    if let Some(i) = names.iter().position(|n| n.trim().to_lowercase() == q) {
        return Some(i);
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, name) in names.iter().enumerate() {
        let lowered = name.trim().to_lowercase();
        let score = jaro_winkler::normalized_similarity(q.chars(), lowered.chars());
        // strict comparison keeps the earlier candidate on ties
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((i, score));
        }
    }

    match best {
        Some((i, score)) if clears_cutoff(score) => Some(i),
        _ => Some(0),
    }
}

fn clears_cutoff(score: f64) -> bool {
    score > SIMILARITY_CUTOFF
}

/// The date range `today - period ..= today`.
///
/// # Errors
///
/// Returns [`RawgError::InvalidDates`] if the start date underflows the calendar.
pub fn popular_date_range(period: TimePeriod, today: NaiveDate) -> Result<DateRange, RawgError> {
    let start = today
        .checked_sub_days(Days::new(period.days()))
        .ok_or(RawgError::InvalidDates)?;
    DateRange::new(start, today)
}

/* ---------------- Public API ---------------- */

/// Searches games by free text.
///
/// # Errors
///
/// Returns an error for invalid parameters, or throttling/transport failures after retries.
pub async fn search_games(
    client: &RawgClient,
    text: &str,
    query: GamesQuery,
) -> Result<Page<GameSummary>, RawgError> {
    SearchBuilder::new(client, text).query(query).fetch().await
}

/// Finds the single game that best matches `name`, or `None` when the search is empty.
///
/// # Errors
///
/// See [`search_games`].
pub async fn search_best_match(client: &RawgClient, name: &str) -> Result<Option<GameSummary>, RawgError> {
    SearchBuilder::new(client, name).best_match().await
}

/// Highest-rated games released during the `period` ending at `now`.
///
/// # Errors
///
/// See [`search_games`].
#[tracing::instrument(skip(client, query), err)]
pub async fn popular_games_at(
    client: &RawgClient,
    period: TimePeriod,
    now: DateTime<Utc>,
    query: GamesQuery,
) -> Result<Page<GameSummary>, RawgError> {
    let range = popular_date_range(period, now.date_naive())?;
    GamesBuilder::from_query(client, query.dates(range).ordering(Ordering::RatingDesc))
        .fetch()
        .await
}

/// [`popular_games_at`] anchored at the current time.
///
/// # Errors
///
/// See [`search_games`].
pub async fn popular_games(
    client: &RawgClient,
    period: TimePeriod,
    query: GamesQuery,
) -> Result<Page<GameSummary>, RawgError> {
    popular_games_at(client, period, Utc::now(), query).await
}

/// Most recently added games. Uses a page size of [`TRENDING_PAGE_SIZE`] unless `query` sets one.
///
/// # Errors
///
/// See [`search_games`].
pub async fn trending_games(client: &RawgClient, query: GamesQuery) -> Result<Page<GameSummary>, RawgError> {
    let mut query = query.ordering(Ordering::AddedDesc);
    if query.list.page_size.is_none() {
        query = query.page_size(TRENDING_PAGE_SIZE);
    }
    GamesBuilder::from_query(client, query).fetch().await
}

/// A builder for free-text game searches.
#[derive(Debug, Clone)]
pub struct SearchBuilder {
    client: RawgClient,
    text: String,
    query: GamesQuery,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl SearchBuilder {
    pub fn new(client: &RawgClient, text: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            text: text.into(),
            query: GamesQuery::new(),
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

    /// Extra filters (ordering, genres, paging...). The search text always wins over `query.search`.
    #[must_use]
    pub fn query(mut self, query: GamesQuery) -> Self {
        self.query = query;
        self
    }

    fn games(&self, query: GamesQuery) -> GamesBuilder {
        GamesBuilder::from_query(&self.client, query.search(self.text.clone()))
            .cache_mode(self.cache_mode)
            .retry_policy(self.retry_override.clone())
    }

    /// Executes the search.
    ///
    /// # Errors
    ///
    /// See [`search_games`].
    pub async fn fetch(&self) -> Result<Page<GameSummary>, RawgError> {
        self.games(self.query.clone()).fetch().await
    }

    /// Fetches up to [`BEST_MATCH_CANDIDATES`] results and picks the closest by name.
    ///
    /// # Errors
    ///
    /// See [`search_games`].
    #[tracing::instrument(skip(self), err, fields(text = %self.text))]
    pub async fn best_match(&self) -> Result<Option<GameSummary>, RawgError> {
        let page = self
            .games(self.query.clone().page(1).page_size(BEST_MATCH_CANDIDATES))
            .fetch()
            .await?;
        let names: Vec<&str> = page.results.iter().map(|g| g.name.as_str()).collect();
        let picked = best_match_index(&self.text, &names);
        if let Some(i) = picked {
            tracing::debug!(candidates = names.len(), picked = names[i], "best match selected");
        }
        Ok(picked.and_then(|i| page.results.into_iter().nth(i)))
    }
}
