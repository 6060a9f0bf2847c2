use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `{ "id": .., "name": .., "slug": .. }` as nested in most payloads.
#[derive(Deserialize, Clone, Default)]
pub(crate) struct NamedRef {
    #[serde(default)]
    pub(crate) name: Option<String>,
}

/// `{ "platform": { "name": .. } }`: platform associations wrap the platform itself.
#[derive(Deserialize, Clone, Default)]
pub(crate) struct PlatformAssoc {
    #[serde(default)]
    pub(crate) platform: Option<NamedRef>,
}

/// Paging envelope shared by every list endpoint.
#[derive(Deserialize, Default)]
pub(crate) struct PageMeta {
    #[serde(default)]
    pub(crate) count: Option<u64>,
    #[serde(default)]
    pub(crate) next: Option<String>,
    #[serde(default)]
    pub(crate) previous: Option<String>,
}

pub(crate) fn names(refs: Option<Vec<NamedRef>>) -> Vec<String> {
    refs.unwrap_or_default()
        .into_iter()
        .filter_map(|r| r.name)
        .collect()
}

pub(crate) fn platform_names(assocs: Option<Vec<PlatformAssoc>>) -> Vec<String> {
    assocs
        .unwrap_or_default()
        .into_iter()
        .filter_map(|a| a.platform.and_then(|p| p.name))
        .collect()
}

/// Accepts a number, a numeric string, or anything else (mapped to `None`).
///
/// Achievement percentages arrive as strings like `"12.34"` and occasionally as junk.
pub(crate) fn de_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(&Value::deserialize(deserializer)?))
}

pub(crate) fn lenient_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// `"2015-05-18"` → date; empty, null or malformed → `None`.
pub(crate) fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}
