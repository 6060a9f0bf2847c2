//! Query parameters: the canonical map sent to the API plus typed builders for it.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::core::RawgError;
use crate::core::client::constants::API_KEY_PARAM;

/// A canonical parameter set. Keys are kept sorted, so two sets with the same pairs render
/// identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: BTreeMap<String, String>,
}

impl QueryParams {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::InvalidParams`] for the reserved API key parameter or an empty key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<(), RawgError> {
        let key = key.into();
        if key.is_empty() {
            return Err(RawgError::InvalidParams("parameter name must not be empty".into()));
        }
        if key.eq_ignore_ascii_case(API_KEY_PARAM) {
            return Err(RawgError::InvalidParams(format!(
                "`{API_KEY_PARAM}` is reserved for the API key"
            )));
        }
        self.pairs.insert(key, value.into());
        Ok(())
    }

    /// Looks up a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// Iterates pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Canonical form-encoded rendering used as the cache key component.
    ///
    /// Keys and values are percent-encoded, so a value containing `&` or `=` cannot collide
    /// with a different parameter set.
    #[must_use]
    pub fn canonical(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    fn set(&mut self, key: &'static str, value: String) {
        self.pairs.insert(key.to_string(), value);
    }
}

/// Ordering tokens accepted by list endpoints. `Desc` variants render with a leading `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Name,
    NameDesc,
    Released,
    ReleasedDesc,
    Added,
    AddedDesc,
    Created,
    CreatedDesc,
    Updated,
    UpdatedDesc,
    Rating,
    RatingDesc,
    Metacritic,
    MetacriticDesc,
}

impl Ordering {
    /// The wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::NameDesc => "-name",
            Self::Released => "released",
            Self::ReleasedDesc => "-released",
            Self::Added => "added",
            Self::AddedDesc => "-added",
            Self::Created => "created",
            Self::CreatedDesc => "-created",
            Self::Updated => "updated",
            Self::UpdatedDesc => "-updated",
            Self::Rating => "rating",
            Self::RatingDesc => "-rating",
            Self::Metacritic => "metacritic",
            Self::MetacriticDesc => "-metacritic",
        }
    }
}

impl std::str::FromStr for Ordering {
    type Err = RawgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => Self::Name,
            "-name" => Self::NameDesc,
            "released" => Self::Released,
            "-released" => Self::ReleasedDesc,
            "added" => Self::Added,
            "-added" => Self::AddedDesc,
            "created" => Self::Created,
            "-created" => Self::CreatedDesc,
            "updated" => Self::Updated,
            "-updated" => Self::UpdatedDesc,
            "rating" => Self::Rating,
            "-rating" => Self::RatingDesc,
            "metacritic" => Self::Metacritic,
            "-metacritic" => Self::MetacriticDesc,
            other => return Err(RawgError::InvalidParams(format!("unknown ordering `{other}`"))),
        })
    }
}

/// An inclusive date range, rendered as `YYYY-MM-DD,YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`RawgError::InvalidDates`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RawgError> {
        if start > end {
            return Err(RawgError::InvalidDates);
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl std::str::FromStr for DateRange {
    type Err = RawgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(',')
            .ok_or_else(|| RawgError::InvalidParams(format!("date range `{s}` needs two dates")))?;
        let parse = |d: &str| {
            NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
                .map_err(|e| RawgError::InvalidParams(format!("bad date `{d}`: {e}")))
        };
        Self::new(parse(a)?, parse(b)?)
    }
}

fn join_ids<T: fmt::Display>(ids: &[T]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

/// Pagination and ordering shared by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    #[must_use]
    pub const fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn page_size(mut self, n: u32) -> Self {
        self.page_size = Some(n);
        self
    }

    /// Renders the query, clamping the page size to `max_page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::InvalidParams`] when `page` or `page_size` is zero.
    pub fn to_params(&self, max_page_size: u32) -> Result<QueryParams, RawgError> {
        let mut p = QueryParams::new();
        self.apply(&mut p, max_page_size)?;
        Ok(p)
    }

    fn apply(&self, p: &mut QueryParams, max_page_size: u32) -> Result<(), RawgError> {
        if let Some(s) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            p.set("search", s.to_string());
        }
        if let Some(o) = self.ordering {
            p.set("ordering", o.as_str().to_string());
        }
        if let Some(page) = self.page {
            if page == 0 {
                return Err(RawgError::InvalidParams("page must be >= 1".into()));
            }
            p.set("page", page.to_string());
        }
        if let Some(size) = self.page_size {
            if size == 0 {
                return Err(RawgError::InvalidParams("page_size must be >= 1".into()));
            }
            let clamped = size.min(max_page_size.max(1));
            if clamped != size {
                tracing::debug!(requested = size, clamped, "page_size clamped to maximum");
            }
            p.set("page_size", clamped.to_string());
        }
        Ok(())
    }
}

/// Filters for the games list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamesQuery {
    pub list: ListQuery,
    pub search_precise: Option<bool>,
    pub search_exact: Option<bool>,
    pub genres: Vec<String>,
    pub platforms: Vec<u64>,
    pub parent_platforms: Vec<u64>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub stores: Vec<u64>,
    pub tags: Vec<String>,
    pub dates: Option<DateRange>,
    pub metacritic: Option<(u8, u8)>,
}

impl GamesQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.list.search = Some(text.into());
        self
    }

    #[must_use]
    pub const fn search_precise(mut self, on: bool) -> Self {
        self.search_precise = Some(on);
        self
    }

    #[must_use]
    pub const fn search_exact(mut self, on: bool) -> Self {
        self.search_exact = Some(on);
        self
    }

    /// Genre ids or slugs.
    #[must_use]
    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn platforms(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.platforms = ids.into_iter().collect();
        self
    }

    #[must_use]
    pub fn parent_platforms(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.parent_platforms = ids.into_iter().collect();
        self
    }

    /// Developer ids or slugs.
    #[must_use]
    pub fn developers<I, S>(mut self, devs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.developers = devs.into_iter().map(Into::into).collect();
        self
    }

    /// Publisher ids or slugs.
    #[must_use]
    pub fn publishers<I, S>(mut self, pubs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.publishers = pubs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn stores(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.stores = ids.into_iter().collect();
        self
    }

    /// Tag ids or slugs.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn dates(mut self, range: DateRange) -> Self {
        self.dates = Some(range);
        self
    }

    /// Metacritic score bounds, inclusive.
    #[must_use]
    pub const fn metacritic(mut self, min: u8, max: u8) -> Self {
        self.metacritic = Some((min, max));
        self
    }

    #[must_use]
    pub const fn ordering(mut self, ordering: Ordering) -> Self {
        self.list.ordering = Some(ordering);
        self
    }

    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.list.page = Some(page);
        self
    }

    #[must_use]
    pub const fn page_size(mut self, n: u32) -> Self {
        self.list.page_size = Some(n);
        self
    }

    /// Renders the query, clamping the page size to `max_page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::InvalidParams`] for a zero page/page size or inverted metacritic bounds.
    pub fn to_params(&self, max_page_size: u32) -> Result<QueryParams, RawgError> {
        let mut p = QueryParams::new();
        self.list.apply(&mut p, max_page_size)?;

        if let Some(b) = self.search_precise {
            p.set("search_precise", b.to_string());
        }
        if let Some(b) = self.search_exact {
            p.set("search_exact", b.to_string());
        }
        let lists: [(&'static str, String); 7] = [
            ("genres", join_ids(&self.genres)),
            ("platforms", join_ids(&self.platforms)),
            ("parent_platforms", join_ids(&self.parent_platforms)),
            ("developers", join_ids(&self.developers)),
            ("publishers", join_ids(&self.publishers)),
            ("stores", join_ids(&self.stores)),
            ("tags", join_ids(&self.tags)),
        ];
        for (k, v) in lists {
            if !v.is_empty() {
                p.set(k, v);
            }
        }
        if let Some(range) = self.dates {
            p.set("dates", range.to_string());
        }
        if let Some((min, max)) = self.metacritic {
            if min > max {
                return Err(RawgError::InvalidParams("metacritic min must not exceed max".into()));
            }
            p.set("metacritic", format!("{min},{max}"));
        }
        Ok(p)
    }
}
