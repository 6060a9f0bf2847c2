//! Best-effort concurrent player counts keyed by Steam app id.
//!
//! Every lookup degrades to `None` ("unknown") on failure: player counts are decoration,
//! never a reason to fail a request.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::core::RawgError;

/// Default Steam Web API root.
pub const DEFAULT_STEAM_BASE_URL: &str = "https://api.steampowered.com/";
/// Default Steam store API root, used for app details.
pub const DEFAULT_STEAM_STORE_URL: &str = "https://store.steampowered.com/api/";
/// Name reported when the store has no record of an app.
pub const UNKNOWN_GAME: &str = "Unknown Game";

const CURRENT_PLAYERS_PATH: &str = "ISteamUserStats/GetNumberOfCurrentPlayers/v1/";
const MOST_PLAYED_PATH: &str = "ISteamChartsService/GetMostPlayedGames/v1/";
const APP_DETAILS_PATH: &str = "appdetails";
const STEAM_TIMEOUT: Duration = Duration::from_secs(6);

type PlayerFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Current and peak players of one app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlayerStats {
    pub app_id: u64,
    pub current: Option<u64>,
    /// Peak concurrent players today, known only for apps in the most-played chart.
    pub peak: Option<u64>,
}

/// One row of the most-played chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChartEntry {
    pub rank: u32,
    pub appid: u64,
    #[serde(default)]
    pub peak_in_game: Option<u64>,
}

/// Store metadata of one app.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppDetails {
    pub app_id: u64,
    pub name: Option<String>,
    pub is_free: bool,
    /// Final US price in dollars; `0.0` for free apps without a price block.
    pub price: Option<f64>,
    /// Store item type, e.g. "game" or "dlc".
    pub kind: Option<String>,
    pub short_description: Option<String>,
}

/// Which apps [`SteamPlayerCounts::most_played_games`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceFilter {
    #[default]
    Any,
    FreeOnly,
    PaidOnly,
}

impl PriceFilter {
    const fn admits(self, is_free: bool) -> bool {
        match self {
            Self::Any => true,
            Self::FreeOnly => is_free,
            Self::PaidOnly => !is_free,
        }
    }
}

/// A most-played chart row enriched with store metadata and live counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MostPlayedGame {
    pub rank: u32,
    pub app_id: u64,
    pub name: String,
    pub current_players: Option<u64>,
    pub peak_players: Option<u64>,
    /// `false` when the store lookup failed.
    pub is_free: bool,
    pub price: Option<f64>,
}

#[derive(Deserialize)]
struct AppDetailsEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<AppDetailsNode>,
}

#[derive(Deserialize)]
struct AppDetailsNode {
    name: Option<String>,
    #[serde(default)]
    is_free: bool,
    price_overview: Option<PriceOverviewNode>,
    #[serde(rename = "type")]
    kind: Option<String>,
    short_description: Option<String>,
}

#[derive(Deserialize)]
struct PriceOverviewNode {
    /// Cents.
    #[serde(rename = "final")]
    final_price: Option<u64>,
}

/// A source of player counts.
///
/// Implemented by [`SteamPlayerCounts`]; tests and callers can substitute their own.
pub trait PlayerCountService: Send + Sync {
    /// Players in game right now, or `None` if unknown.
    fn current_players(&self, app_id: u64) -> PlayerFuture<'_, Option<u64>>;

    /// Today's peak, or `None` if unknown.
    fn peak_players(&self, app_id: u64) -> PlayerFuture<'_, Option<u64>>;

    /// Both counts, looked up concurrently.
    fn player_stats(&self, app_id: u64) -> PlayerFuture<'_, PlayerStats> {
        Box::pin(async move {
            let (current, peak) =
                futures::join!(self.current_players(app_id), self.peak_players(app_id));
            PlayerStats {
                app_id,
                current,
                peak,
            }
        })
    }
}

/// Player counts from the public Steam Web API.
#[derive(Debug, Clone)]
pub struct SteamPlayerCounts {
    http: reqwest::Client,
    base: Url,
    store: Url,
    api_key: Option<String>,
}

impl SteamPlayerCounts {
    /// Creates a service against the public Steam API.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Config`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, RawgError> {
        let http = reqwest::Client::builder()
            .user_agent(crate::core::client::constants::USER_AGENT)
            .timeout(STEAM_TIMEOUT)
            .build()
            .map_err(|e| RawgError::Config(format!("failed to build Steam HTTP client: {e}")))?;
        Self::from_client(http)
    }

    /// Wraps an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in base URL; kept fallible to mirror [`SteamPlayerCounts::base_url`].
    pub fn from_client(http: reqwest::Client) -> Result<Self, RawgError> {
        Ok(Self {
            http,
            base: Url::parse(DEFAULT_STEAM_BASE_URL)?,
            store: Url::parse(DEFAULT_STEAM_STORE_URL)?,
            api_key: None,
        })
    }

    /// Points the service at another host (mainly for tests).
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Url`] if `base` is not a valid URL.
    pub fn base_url(mut self, base: &str) -> Result<Self, RawgError> {
        self.base = dir_url(base)?;
        Ok(self)
    }

    /// Points app-details lookups at another store host (mainly for tests).
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Url`] if `base` is not a valid URL.
    pub fn store_base_url(mut self, base: &str) -> Result<Self, RawgError> {
        self.store = dir_url(base)?;
        Ok(self)
    }

    /// Steam Web API key; optional for the endpoints used here.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into()).filter(|k| !k.trim().is_empty());
        self
    }

    /// GETs `url` as JSON. The Web API key, if any, is appended only when `send_key` is set
    /// and never appears in errors.
    async fn get_json(&self, mut url: Url, send_key: bool) -> Result<Value, RawgError> {
        let redacted = url.to_string();
        if send_key {
            if let Some(key) = &self.api_key {
                url.query_pairs_mut().append_pair("key", key);
            }
        }

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RawgError::from_reqwest(e, &redacted))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RawgError::Status {
                status: status.as_u16(),
                url: redacted,
            });
        }
        let body = resp
            .text()
            .await
            .map_err(|e| RawgError::from_reqwest(e, &redacted))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// The most-played chart as published by Steam.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload lacks `response.ranks`.
    pub async fn most_played(&self) -> Result<Vec<ChartEntry>, RawgError> {
        let v = self
            .get_json(with_query(&self.base, MOST_PLAYED_PATH, &[])?, true)
            .await?;
        let ranks = v
            .pointer("/response/ranks")
            .cloned()
            .ok_or_else(|| RawgError::Data("missing response.ranks".into()))?;
        Ok(serde_json::from_value(ranks)?)
    }

    async fn try_current(&self, app_id: u64) -> Result<Option<u64>, RawgError> {
        let url = with_query(&self.base, CURRENT_PLAYERS_PATH, &[("appid", app_id.to_string())])?;
        let v = self.get_json(url, true).await?;
        Ok(v.pointer("/response/player_count").and_then(Value::as_u64))
    }

    /// Store metadata for `app_id`, or `None` if the store has no record or the lookup fails.
    pub async fn app_details(&self, app_id: u64) -> Option<AppDetails> {
        self.try_app_details(app_id)
            .await
            .inspect_err(|e| tracing::debug!(app_id, error = %e, "app details unavailable"))
            .ok()
            .flatten()
    }

    /// The store name of `app_id`, or [`UNKNOWN_GAME`].
    pub async fn game_name(&self, app_id: u64) -> String {
        self.app_details(app_id)
            .await
            .and_then(|d| d.name)
            .unwrap_or_else(|| UNKNOWN_GAME.to_string())
    }

    /// Up to `limit` apps from the most-played chart that pass `filter`, in chart order.
    ///
    /// Each kept row costs one store lookup and one current-players lookup. A chart that
    /// cannot be fetched yields an empty list.
    pub async fn most_played_games(&self, limit: usize, filter: PriceFilter) -> Vec<MostPlayedGame> {
        if limit == 0 {
            return Vec::new();
        }
        let chart = match self.most_played().await {
            Ok(chart) => chart,
            Err(e) => {
                tracing::debug!(error = %e, "most-played chart unavailable");
                return Vec::new();
            }
        };

        let mut games = Vec::with_capacity(limit.min(chart.len()));
        for entry in chart {
            if games.len() >= limit {
                break;
            }
            let details = self.app_details(entry.appid).await;
            let is_free = details.as_ref().is_some_and(|d| d.is_free);
            if !filter.admits(is_free) {
                continue;
            }
            let (name, price) = match details {
                Some(d) => (d.name.unwrap_or_else(|| UNKNOWN_GAME.to_string()), d.price),
                None => (UNKNOWN_GAME.to_string(), None),
            };
            games.push(MostPlayedGame {
                rank: entry.rank,
                app_id: entry.appid,
                name,
                current_players: self.current_players(entry.appid).await,
                peak_players: entry.peak_in_game,
                is_free,
                price,
            });
        }
        games
    }

    /// Most-played free apps.
    pub async fn top_free_games(&self, limit: usize) -> Vec<MostPlayedGame> {
        self.most_played_games(limit, PriceFilter::FreeOnly).await
    }

    /// Most-played paid apps.
    pub async fn top_paid_games(&self, limit: usize) -> Vec<MostPlayedGame> {
        self.most_played_games(limit, PriceFilter::PaidOnly).await
    }

    #[allow(clippy::cast_precision_loss)]
    async fn try_app_details(&self, app_id: u64) -> Result<Option<AppDetails>, RawgError> {
        let url = with_query(
            &self.store,
            APP_DETAILS_PATH,
            &[
                ("appids", app_id.to_string()),
                ("cc", "us".to_string()),
                ("l", "en".to_string()),
            ],
        )?;
        let mut v = self.get_json(url, false).await?;
        let Some(entry) = v.get_mut(app_id.to_string()).map(Value::take) else {
            return Ok(None);
        };
        let envelope: AppDetailsEnvelope = serde_json::from_value(entry)?;
        let Some(data) = envelope.data.filter(|_| envelope.success) else {
            return Ok(None);
        };

        let price = match data.price_overview {
            Some(po) => po.final_price.map(|cents| cents as f64 / 100.0),
            None if data.is_free => Some(0.0),
            None => None,
        };
        Ok(Some(AppDetails {
            app_id,
            name: data.name,
            is_free: data.is_free,
            price,
            kind: data.kind,
            short_description: data.short_description,
        }))
    }

    async fn try_peak(&self, app_id: u64) -> Result<Option<u64>, RawgError> {
        Ok(self
            .most_played()
            .await?
            .into_iter()
            .find(|e| e.appid == app_id)
            .and_then(|e| e.peak_in_game))
    }
}

impl PlayerCountService for SteamPlayerCounts {
    fn current_players(&self, app_id: u64) -> PlayerFuture<'_, Option<u64>> {
        Box::pin(async move {
            self.try_current(app_id)
                .await
                .inspect_err(|e| tracing::debug!(app_id, error = %e, "current player count unavailable"))
                .ok()
                .flatten()
        })
    }

    fn peak_players(&self, app_id: u64) -> PlayerFuture<'_, Option<u64>> {
        Box::pin(async move {
            self.try_peak(app_id)
                .await
                .inspect_err(|e| tracing::debug!(app_id, error = %e, "peak player count unavailable"))
                .ok()
                .flatten()
        })
    }
}

fn dir_url(base: &str) -> Result<Url, RawgError> {
    let mut s = base.to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    Ok(Url::parse(&s)?)
}

fn with_query(base: &Url, path: &str, params: &[(&str, String)]) -> Result<Url, RawgError> {
    let mut url = base.join(path)?;
    if !params.is_empty() {
        let mut qp = url.query_pairs_mut();
        for (k, v) in params {
            qp.append_pair(k, v);
        }
    }
    Ok(url)
}
