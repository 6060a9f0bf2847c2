//! Path templates for every resource the client can reach.

use crate::core::RawgError;

/// A remote resource. Detail variants carry the id or slug of the resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Games,
    Game(String),
    GameScreenshots(String),
    GameMovies(String),
    GameAchievements(String),
    GameStores(String),
    GameSeries(String),
    GameAdditions(String),
    GameParentGames(String),
    GameDevelopmentTeam(String),
    Developers,
    Developer(String),
    Publishers,
    Publisher(String),
    Platforms,
    ParentPlatforms,
    Platform(String),
    Genres,
    Genre(String),
    Tags,
    Tag(String),
    Creators,
    Creator(String),
    CreatorRoles,
    Stores,
    Store(String),
}

impl Endpoint {
    /// Path relative to the API base, without a leading slash.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Games => "games".into(),
            Self::Game(id) => format!("games/{id}"),
            Self::GameScreenshots(id) => format!("games/{id}/screenshots"),
            Self::GameMovies(id) => format!("games/{id}/movies"),
            Self::GameAchievements(id) => format!("games/{id}/achievements"),
            Self::GameStores(id) => format!("games/{id}/stores"),
            Self::GameSeries(id) => format!("games/{id}/game-series"),
            Self::GameAdditions(id) => format!("games/{id}/additions"),
            Self::GameParentGames(id) => format!("games/{id}/parent-games"),
            Self::GameDevelopmentTeam(id) => format!("games/{id}/development-team"),
            Self::Developers => "developers".into(),
            Self::Developer(id) => format!("developers/{id}"),
            Self::Publishers => "publishers".into(),
            Self::Publisher(id) => format!("publishers/{id}"),
            Self::Platforms => "platforms".into(),
            Self::ParentPlatforms => "platforms/lists/parents".into(),
            Self::Platform(id) => format!("platforms/{id}"),
            Self::Genres => "genres".into(),
            Self::Genre(id) => format!("genres/{id}"),
            Self::Tags => "tags".into(),
            Self::Tag(id) => format!("tags/{id}"),
            Self::Creators => "creators".into(),
            Self::Creator(id) => format!("creators/{id}"),
            Self::CreatorRoles => "creator-roles".into(),
            Self::Stores => "stores".into(),
            Self::Store(id) => format!("stores/{id}"),
        }
    }
}

/// Validates a caller-supplied id or slug so it stays a single path segment.
///
/// # Errors
///
/// Returns [`RawgError::InvalidParams`] for empty ids or ids containing path or query syntax.
pub fn resource_id(id: impl std::fmt::Display) -> Result<String, RawgError> {
    let id = id.to_string();
    let id = id.trim();
    if id.is_empty() {
        return Err(RawgError::InvalidParams("resource id must not be empty".into()));
    }
    if id.contains(['/', '?', '#', '%']) || id == "." || id == ".." {
        return Err(RawgError::InvalidParams(format!("invalid resource id `{id}`")));
    }
    Ok(id.to_string())
}
