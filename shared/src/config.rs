use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::{Accuracy, ValidatedUrl};

pub const DEFAULT_SPAN_LAT: f64 = 0.01;
pub const DEFAULT_SPAN_LON: f64 = 0.01;
pub const PORTRAIT_CONTENT_HEIGHT: f64 = 250.0;
pub const LANDSCAPE_CHROME_HEIGHT: f64 = 120.0;
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_CATALOG_LIMIT: u32 = 10;
pub const MAX_CATALOG_LIMIT: u32 = 100;
pub const DEFAULT_VIDEO_ID: &str = "dQw4w9WgXcQ";
pub const VIDEO_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Tunables the shell may override with `Event::Configure`.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub span_lat: f64,
    pub span_lon: f64,
    pub fix_accuracy: Accuracy,
    pub layout: LayoutConfig,
    pub catalog_url: String,
    pub catalog_limit: u32,
    pub video_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            span_lat: DEFAULT_SPAN_LAT,
            span_lon: DEFAULT_SPAN_LON,
            fix_accuracy: Accuracy::High,
            layout: LayoutConfig::default(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            video_id: DEFAULT_VIDEO_ID.to_string(),
        }
    }
}

/// Geometry constants for the orientation-driven content height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub portrait_content_height: f64,
    pub landscape_chrome_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            portrait_content_height: PORTRAIT_CONTENT_HEIGHT,
            landscape_chrome_height: LANDSCAPE_CHROME_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be a non-negative finite number, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("catalog limit must be between 1 and {max}, got {value}")]
    CatalogLimit { value: u32, max: u32 },
    #[error("invalid catalog url: {0}")]
    CatalogUrl(String),
    #[error("video id must be a non-empty alphanumeric token")]
    VideoId,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("span_lat", self.span_lat)?;
        positive("span_lon", self.span_lon)?;
        positive(
            "layout.portrait_content_height",
            self.layout.portrait_content_height,
        )?;
        if !self.layout.landscape_chrome_height.is_finite()
            || self.layout.landscape_chrome_height < 0.0
        {
            return Err(ConfigError::Negative {
                field: "layout.landscape_chrome_height",
                value: self.layout.landscape_chrome_height,
            });
        }
        if self.catalog_limit == 0 || self.catalog_limit > MAX_CATALOG_LIMIT {
            return Err(ConfigError::CatalogLimit {
                value: self.catalog_limit,
                max: MAX_CATALOG_LIMIT,
            });
        }
        ValidatedUrl::new(&self.catalog_url)
            .map_err(|e| ConfigError::CatalogUrl(e.to_string()))?;
        let valid_video_id = !self.video_id.is_empty()
            && self
                .video_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_video_id {
            return Err(ConfigError::VideoId);
        }
        Ok(())
    }

    /// Catalog endpoint with the item limit applied as a query parameter.
    pub fn catalog_endpoint(&self) -> Result<ValidatedUrl, ConfigError> {
        let base = ValidatedUrl::new(&self.catalog_url)
            .map_err(|e| ConfigError::CatalogUrl(e.to_string()))?;
        Ok(base.with_query_pair("limit", &self.catalog_limit.to_string()))
    }

    #[must_use]
    pub fn video_embed_url(&self) -> String {
        format!("{VIDEO_EMBED_BASE}{}", self.video_id)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
