use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::wire::{NamedRef, PlatformAssoc, de_lenient_f64, de_opt_date};

#[derive(Deserialize)]
pub(crate) struct GameNode {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) slug: Option<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub(crate) released: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub(crate) rating: Option<f64>,
    #[serde(default)]
    pub(crate) ratings_count: Option<u64>,
    #[serde(default)]
    pub(crate) genres: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub(crate) platforms: Option<Vec<PlatformAssoc>>,
    #[serde(default)]
    pub(crate) background_image: Option<String>,

    /* detail-only fields */
    #[serde(default)]
    pub(crate) description_raw: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) developers: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub(crate) publishers: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub(crate) website: Option<String>,
    #[serde(default)]
    pub(crate) esrb_rating: Option<NamedRef>,
}

#[derive(Deserialize)]
pub(crate) struct ScreenshotNode {
    #[serde(default)]
    pub(crate) id: Option<i64>,
    pub(crate) image: String,
    #[serde(default)]
    pub(crate) width: Option<u32>,
    #[serde(default)]
    pub(crate) height: Option<u32>,
}

#[derive(Deserialize)]
pub(crate) struct AchievementNode {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub(crate) percent: Option<f64>,
    #[serde(default)]
    pub(crate) image: Option<String>,
}
