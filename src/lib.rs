//! rawg-rs: async client for the RAWG video-game database.
//!
//! One [`RawgClient`] per process handles authentication, request spacing, retries with
//! doubling backoff and an in-memory TTL cache. On top of it sit a raw JSON façade (one
//! method per resource), typed models for games, search helpers with fuzzy best-match,
//! best-effort Steam player counts, and a chat assistant.
//!
//! ```no_run
//! # async fn demo() -> Result<(), rawg_rs::RawgError> {
//! use std::time::Duration;
//! use rawg_rs::{RawgClient, search};
//!
//! let client = RawgClient::builder()
//!     .api_key("YOUR_KEY")
//!     .cache_ttl(Duration::from_secs(3600))
//!     .build()?;
//! if let Some(game) = search::search_best_match(&client, "portal 2").await? {
//!     println!("{} ({:?})", game.name, game.released);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod core;
pub mod games;
pub mod players;
pub mod search;

pub use crate::core::{
    ApiResponse, CacheMode, DateRange, Endpoint, GamesQuery, ListQuery, Ordering, QueryParams,
    RawgClient, RawgClientBuilder, RawgError, RetryConfig,
};
pub use assistant::{Assistant, ChatBackend, ChatMessage, OpenAiCompatibleBackend, Role};
pub use catalog::{CatalogBuilder, CatalogEntry, CatalogKind};
pub use config::Settings;
pub use games::{Achievement, Game, GameDetail, GameSummary, GamesBuilder, Page, Screenshot};
pub use players::{
    AppDetails, MostPlayedGame, PlayerCountService, PlayerStats, PriceFilter, SteamPlayerCounts,
};
pub use search::{SearchBuilder, TimePeriod};

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
