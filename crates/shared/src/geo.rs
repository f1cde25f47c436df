//! GeoJSON feature collection holding the decorative outline drawn over the
//! map. Only the first polygon's outer ring is used.
use serde::Deserialize;

use crate::config::ConfigError;
use crate::models::Coordinate;

const POLYGON: &str = "Polygon";

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    /// Rings of `[lng, lat]` positions; the first ring is the outer boundary.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl FeatureCollection {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Outer ring of the first feature, which must be a polygon, as lat/lng
    /// coordinates.
    pub fn outline(&self) -> Result<Vec<Coordinate>, ConfigError> {
        let feature = self.features.first().ok_or(ConfigError::NoFeatures)?;
        if feature.geometry.geometry_type != POLYGON {
            return Err(ConfigError::UnsupportedGeometry(
                feature.geometry.geometry_type.clone(),
            ));
        }
        let ring = feature
            .geometry
            .coordinates
            .first()
            .filter(|ring| !ring.is_empty())
            .ok_or(ConfigError::EmptyOutline)?;
        Ok(ring.iter().copied().map(Coordinate::from_lng_lat).collect())
    }
}

/// Parse a feature collection and return its outline in one step.
pub fn load_outline(data: &str) -> Result<Vec<Coordinate>, ConfigError> {
    FeatureCollection::from_json(data)?.outline()
}
