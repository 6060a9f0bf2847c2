use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::wire::{AchievementNode, GameNode, ScreenshotNode};
use crate::core::net::results_of;
use crate::core::wire::{PageMeta, names, platform_names};

/// A game as it appears in list results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub released: Option<NaiveDate>,
    /// Average user rating on a 0–5 scale.
    pub rating: Option<f64>,
    /// Genre names in API order.
    pub genres: Vec<String>,
    /// Platform names in API order.
    pub platforms: Vec<String>,
    pub background_image: Option<String>,
    pub ratings_count: Option<u64>,
}

/// Full record of a single game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDetail {
    pub summary: GameSummary,
    /// Plain-text description (falls back to the HTML one if the plain form is absent).
    pub description: Option<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub website: Option<String>,
    /// ESRB label, e.g. "Mature".
    pub content_rating: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screenshot {
    pub id: Option<i64>,
    pub image: String,
    pub game_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub name: String,
    pub description: Option<String>,
    /// Share of players who unlocked it, 0–100. `None` when the API value is not numeric.
    pub percent: Option<f64>,
    pub image: Option<String>,
    pub game_id: String,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Total number of results across all pages, when reported.
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: None,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/* ---------- wire → public models ---------- */

fn decode_items<N, T>(value: &Value, what: &str, mut map: impl FnMut(N) -> Option<T>) -> Vec<T>
where
    N: serde::de::DeserializeOwned,
{
    results_of(value, what)
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<N>(item) {
            Ok(node) => map(node),
            Err(e) => {
                tracing::warn!(what, error = %e, "skipping malformed item");
                None
            }
        })
        .collect()
}

fn summary_from(node: &GameNode) -> GameSummary {
    GameSummary {
        id: node.id,
        name: node.name.clone().unwrap_or_default(),
        slug: node.slug.clone().unwrap_or_default(),
        released: node.released,
        rating: node.rating,
        genres: names(node.genres.clone()),
        platforms: platform_names(node.platforms.clone()),
        background_image: node.background_image.clone().filter(|s| !s.is_empty()),
        ratings_count: node.ratings_count,
    }
}

pub(crate) fn game_page(value: &Value) -> Page<GameSummary> {
    let meta: PageMeta = serde_json::from_value(value.clone()).unwrap_or_default();
    Page {
        count: meta.count,
        next: meta.next,
        previous: meta.previous,
        results: decode_items(value, "games", |n: GameNode| Some(summary_from(&n))),
    }
}

pub(crate) fn game_detail(value: Value) -> Option<GameDetail> {
    if value.as_object().is_none_or(serde_json::Map::is_empty) {
        return None;
    }
    match serde_json::from_value::<GameNode>(value) {
        Ok(node) => Some(GameDetail {
            summary: summary_from(&node),
            description: node.description_raw.or(node.description),
            developers: names(node.developers),
            publishers: names(node.publishers),
            website: node.website.filter(|s| !s.is_empty()),
            content_rating: node.esrb_rating.and_then(|r| r.name),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "game detail has unexpected shape; treating as empty");
            None
        }
    }
}

pub(crate) fn screenshots(value: &Value, game_id: &str) -> Vec<Screenshot> {
    decode_items(value, "screenshots", |n: ScreenshotNode| {
        Some(Screenshot {
            id: n.id,
            image: n.image,
            game_id: game_id.to_string(),
            width: n.width,
            height: n.height,
        })
    })
}

pub(crate) fn achievements(value: &Value, game_id: &str) -> Vec<Achievement> {
    decode_items(value, "achievements", |n: AchievementNode| {
        Some(Achievement {
            name: n.name?,
            description: n.description.filter(|s| !s.is_empty()),
            percent: n.percent,
            image: n.image.filter(|s| !s.is_empty()),
            game_id: game_id.to_string(),
        })
    })
}
