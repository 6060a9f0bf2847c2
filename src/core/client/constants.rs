//! Centralized constants for default endpoints, UA and client limits.

/// Identifies the client to the API operators.
pub(crate) const USER_AGENT: &str = concat!("rawg-rs/", env!("CARGO_PKG_VERSION"));

/// RAWG API base. Resource paths are joined onto it, so it must end with `/`.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api/";

/// Name of the query parameter carrying the API key. Reserved: callers may not set it.
pub(crate) const API_KEY_PARAM: &str = "key";

/// Largest page size the API accepts.
pub(crate) const DEFAULT_MAX_PAGE_SIZE: u32 = 40;

/// Minimum spacing between two outbound requests.
pub(crate) const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 100;

/// Overall per-request timeout.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
