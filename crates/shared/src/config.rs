use serde::Deserialize;
use thiserror::Error;

use crate::models::Coordinate;
use crate::projection::{MAX_ZOOM, MIN_ZOOM};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error from serde_json in config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feature collection has no features")]
    NoFeatures,
    #[error("first feature has an empty outline")]
    EmptyOutline,
    #[error("outline geometry must be a Polygon, found [{0}]")]
    UnsupportedGeometry(String),
    #[error("zoom {zoom} outside allowed range [{min}, {max}]")]
    InvalidZoom { zoom: u8, min: u8, max: u8 },
}

/// Marker icon geometry, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconConfig {
    pub width: f64,
    pub height: f64,
    /// Offset of the icon tip from its top-left corner.
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl Default for IconConfig {
    fn default() -> Self {
        IconConfig {
            width: 58.0,
            height: 68.0,
            anchor_x: 29.0,
            anchor_y: 68.0,
        }
    }
}

/// Inclusive range of zoom levels the map may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    pub min: u8,
    pub max: u8,
}

impl ZoomRange {
    /// Clamp a requested zoom level into the range.
    pub fn clamp(&self, zoom: i32) -> u8 {
        zoom.clamp(self.min as i32, self.max as i32) as u8
    }

    pub fn contains(&self, zoom: u8) -> bool {
        self.min <= zoom && zoom <= self.max
    }
}

/// Map settings loaded from `config/map.json`. Missing keys fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub center: Coordinate,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub subdomains: Vec<String>,
    /// HTML snippet shown in the attribution corner.
    pub attribution: String,
    pub outline_color: String,
    pub marker_icon: IconConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: Coordinate::new(-15.185309410095217, -53.58890914916992),
            zoom: 15,
            min_zoom: MIN_ZOOM,
            max_zoom: 19,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: r#"&copy; <a href="http://osm.org/copyright">OpenStreetMap</a> contributors"#
                .to_string(),
            outline_color: "purple".to_string(),
            marker_icon: IconConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let range = self.zoom_range();
        if range.min > range.max || !range.contains(self.zoom) {
            return Err(ConfigError::InvalidZoom {
                zoom: self.zoom,
                min: range.min,
                max: range.max,
            });
        }
        Ok(())
    }

    /// Configured zoom limits, capped at what the tile math supports.
    pub fn zoom_range(&self) -> ZoomRange {
        ZoomRange {
            min: self.min_zoom,
            max: self.max_zoom.min(MAX_ZOOM),
        }
    }
}
