use reqwest::header::ACCEPT;
use serde_json::{Map, Value};

#[cfg(feature = "test-mode")]
use std::env;

use crate::core::client::constants::API_KEY_PARAM;
use crate::core::{QueryParams, RawgClient, RawgError};

/// Outcome of a single successful round trip.
///
/// A 404 is not an error for this API: the resource simply does not exist.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// A 2xx response and its JSON body.
    Found(Value),
    /// The API answered 404.
    NotFound,
}

impl ApiResponse {
    /// The JSON body, or an empty object for [`ApiResponse::NotFound`].
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Found(v) => v,
            Self::NotFound => Value::Object(Map::new()),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Issues one GET against `path` and classifies the outcome.
///
/// The API key is appended last and only to the outgoing URL; every URL that reaches a log
/// line or an error is the redacted form built before that.
pub(crate) async fn execute(
    client: &RawgClient,
    path: &str,
    params: &QueryParams,
) -> Result<ApiResponse, RawgError> {
    let mut url = client.base_url().join(path)?;
    if !params.is_empty() {
        let mut qp = url.query_pairs_mut();
        for (k, v) in params.iter() {
            qp.append_pair(k, v);
        }
    }
    let redacted = url.to_string();
    url.query_pairs_mut().append_pair(API_KEY_PARAM, client.api_key());

    tracing::debug!(url = %redacted, "GET");
    let resp = client
        .http()
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| RawgError::from_reqwest(e, &redacted))?;

    let status = resp.status();
    match status.as_u16() {
        404 => {
            tracing::debug!(url = %redacted, "resource not found");
            return Ok(ApiResponse::NotFound);
        }
        429 => return Err(RawgError::RateLimited { url: redacted }),
        code if !status.is_success() => {
            return Err(RawgError::Status {
                status: code,
                url: redacted,
            });
        }
        _ => {}
    }

    let body = get_text(resp, path)
        .await
        .map_err(|e| RawgError::from_reqwest(e, &redacted))?;

    match serde_json::from_str::<Value>(&body) {
        Ok(v) => Ok(ApiResponse::Found(v)),
        Err(e) => {
            tracing::warn!(url = %redacted, error = %e, "response body is not JSON; treating as empty");
            Ok(ApiResponse::Found(Value::Object(Map::new())))
        }
    }
}

/// Read the response body as text.
/// In `test-mode`, if `RAWG_RECORD=1`, the body is saved as a fixture named after the path.
pub(crate) async fn get_text(resp: reqwest::Response, _path: &str) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if env::var("RAWG_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::core::fixtures::record_fixture(_path, &text)
        {
            tracing::warn!(path = _path, error = %e, "RAWG_RECORD: failed to write fixture");
        }
    }

    Ok(text)
}

/// Turns a list envelope into its `results` array, degrading to empty on schema drift.
pub(crate) fn results_of(value: &Value, what: &str) -> Vec<Value> {
    match value.get("results") {
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            tracing::warn!(what, "`results` is not an array; treating as empty");
            Vec::new()
        }
        None => {
            if value.as_object().is_some_and(|o| !o.is_empty()) {
                tracing::warn!(what, "response has no `results` field; treating as empty");
            }
            Vec::new()
        }
    }
}
