use serde::{Deserialize, Serialize};

/// Identifier of a placed point. Handed out by the store from a counter that
/// only ever increases, so an id is never reused after a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u32);

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic position in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }

    /// Build from a GeoJSON position, which is ordered `[lng, lat]`.
    pub fn from_lng_lat(pair: [f64; 2]) -> Self {
        Coordinate {
            lat: pair[1],
            lng: pair[0],
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// A user-placed marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    /// Creation time, already formatted for display.
    pub date: String,
    pub coordinate: Coordinate,
    pub selected: bool,
}

impl Point {
    /// List label, e.g. "Ponto nº 3".
    pub fn label(&self) -> String {
        format!("Ponto nº {}", self.id)
    }
}
