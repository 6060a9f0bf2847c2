use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// "Not found" is deliberately absent: a 404 from the API is an empty result, not an error.
/// URLs carried by these variants never contain the API key.
#[derive(Debug, Error)]
pub enum RawgError {
    /// The API signalled throttling (HTTP 429) and retries were exhausted or disabled.
    #[error("rate limited at {url}")]
    RateLimited {
        /// The redacted URL that was throttled.
        url: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out at {url}")]
    Timeout {
        /// The redacted URL of the request.
        url: String,
    },

    /// A connection to the remote host could not be established.
    #[error("connection failed to {url}")]
    Connect {
        /// The redacted URL of the request.
        url: String,
    },

    /// Any other transport-level failure (body read, decoding, redirect loops).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server returned an unsuccessful HTTP status code other than 404 or 429.
    #[error("unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The redacted URL that returned the error.
        url: String,
    },

    /// The caller supplied parameters the API cannot accept. Never retried.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// An invalid date range was provided (start must not be after end).
    #[error("invalid date range: start must not be after end")]
    InvalidDates,

    /// A provided URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A JSON payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The client could not be configured.
    #[error("configuration error: {0}")]
    Config(String),

    /// The data received was in an unexpected format.
    #[error("data format unexpected or missing field: {0}")]
    Data(String),
}

impl RawgError {
    /// Maps a `reqwest` failure to the transport taxonomy.
    ///
    /// The URL embedded in `reqwest::Error` still carries the API key, so it is dropped and
    /// replaced by the caller-provided redacted form.
    pub(crate) fn from_reqwest(err: reqwest::Error, redacted_url: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: redacted_url.to_string(),
            }
        } else if err.is_connect() {
            Self::Connect {
                url: redacted_url.to_string(),
            }
        } else {
            Self::Transport(err.without_url().to_string())
        }
    }

    /// Whether this error belongs to the transient class (throttling or transport).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Connect { .. } | Self::Transport(_)
        )
    }
}
