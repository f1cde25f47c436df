/// Spherical Web-Mercator projection used by slippy-map tile servers.
///
/// "World pixels" are measured from the top-left corner (lng -180, lat
/// ~85.05) of a world that is `TILE_SIZE * 2^zoom` pixels square.
use crate::models::Coordinate;

pub const TILE_SIZE: f64 = 256.0;

pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 22;

/// Latitude limit of the square Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Side length of the world in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(zoom as i32)
}

/// Project a coordinate to world pixels.
pub fn project(coord: Coordinate, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coord.lng + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: u8) -> Coordinate {
    let size = world_size(zoom);
    let lng = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * y / size;
    let lat = n.sinh().atan().to_degrees();
    Coordinate::new(lat, lng)
}

/// Visible map area: a center coordinate, integer zoom, and the size of the
/// container it is drawn into (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(center: Coordinate, zoom: u8, width: f64, height: f64) -> Self {
        Viewport {
            center,
            zoom,
            width,
            height,
        }
    }

    /// World-pixel position of the container's top-left corner.
    pub fn origin(&self) -> (f64, f64) {
        let (cx, cy) = project(self.center, self.zoom);
        (cx - self.width / 2.0, cy - self.height / 2.0)
    }

    /// Container-relative pixel position of a coordinate.
    pub fn to_container(&self, coord: Coordinate) -> (f64, f64) {
        let (ox, oy) = self.origin();
        let (x, y) = project(coord, self.zoom);
        (x - ox, y - oy)
    }

    /// Coordinate under a container-relative pixel position.
    pub fn to_coordinate(&self, x: f64, y: f64) -> Coordinate {
        let (ox, oy) = self.origin();
        unproject(ox + x, oy + y, self.zoom)
    }

    /// Center after dragging the map content by `(dx, dy)` pixels.
    pub fn panned(&self, dx: f64, dy: f64) -> Coordinate {
        let (cx, cy) = project(self.center, self.zoom);
        let size = world_size(self.zoom);
        let ny = (cy - dy).clamp(0.0, size);
        unproject(cx - dx, ny, self.zoom)
    }

    /// Center for `new_zoom` that keeps the coordinate under the container
    /// point `(x, y)` fixed on screen.
    pub fn zoomed_at(&self, x: f64, y: f64, new_zoom: u8) -> Coordinate {
        let anchor = self.to_coordinate(x, y);
        let (ax, ay) = project(anchor, new_zoom);
        let cx = ax - x + self.width / 2.0;
        let cy = ay - y + self.height / 2.0;
        unproject(cx, cy, new_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_world_size() {
        assert_eq!(world_size(0), 256.0);
        assert_eq!(world_size(3), 2048.0);
    }

    #[test]
    fn test_project_origin_is_world_center() {
        let (x, y) = project(Coordinate::new(0.0, 0.0), 1);
        assert!(close(x, 256.0, 1e-9));
        assert!(close(y, 256.0, 1e-9));
    }

    #[test]
    fn test_project_corners() {
        let (x, y) = project(Coordinate::new(MAX_LATITUDE, -180.0), 0);
        assert!(close(x, 0.0, 1e-6));
        assert!(close(y, 0.0, 1e-6));
        let (x, _) = project(Coordinate::new(0.0, 180.0), 0);
        assert!(close(x, 256.0, 1e-9));
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let c = Coordinate::new(-15.185309410095217, -53.58890914916992);
        let (x, y) = project(c, 15);
        let back = unproject(x, y, 15);
        assert!(close(back.lat, c.lat, 1e-9));
        assert!(close(back.lng, c.lng, 1e-9));
    }

    #[test]
    fn test_project_clamps_poles() {
        let (_, y) = project(Coordinate::new(90.0, 0.0), 0);
        assert!(y.is_finite());
        assert!(close(y, 0.0, 1e-6));
    }

    #[test]
    fn test_viewport_center_maps_to_container_center() {
        let vp = Viewport::new(Coordinate::new(-15.18, -53.58), 15, 800.0, 600.0);
        let (x, y) = vp.to_container(vp.center);
        assert!(close(x, 400.0, 1e-6));
        assert!(close(y, 300.0, 1e-6));
        let c = vp.to_coordinate(400.0, 300.0);
        assert!(close(c.lat, -15.18, 1e-9));
        assert!(close(c.lng, -53.58, 1e-9));
    }

    #[test]
    fn test_viewport_container_roundtrip() {
        let vp = Viewport::new(Coordinate::new(48.85, 2.35), 12, 1024.0, 768.0);
        let c = vp.to_coordinate(120.0, 650.0);
        let (x, y) = vp.to_container(c);
        assert!(close(x, 120.0, 1e-6));
        assert!(close(y, 650.0, 1e-6));
    }

    #[test]
    fn test_panned_moves_center_against_drag() {
        let vp = Viewport::new(Coordinate::new(0.0, 0.0), 4, 800.0, 600.0);
        // Dragging content to the right reveals what is to the west.
        let c = vp.panned(100.0, 0.0);
        assert!(c.lng < 0.0);
        assert!(close(c.lat, 0.0, 1e-9));
        // Dragging content down reveals what is to the north.
        let c = vp.panned(0.0, 100.0);
        assert!(c.lat > 0.0);
    }

    #[test]
    fn test_zoomed_at_keeps_anchor_fixed() {
        let vp = Viewport::new(Coordinate::new(-15.18, -53.58), 14, 800.0, 600.0);
        let anchor = vp.to_coordinate(200.0, 150.0);
        let center = vp.zoomed_at(200.0, 150.0, 15);
        let zoomed = Viewport::new(center, 15, 800.0, 600.0);
        let (x, y) = zoomed.to_container(anchor);
        assert!(close(x, 200.0, 1e-6));
        assert!(close(y, 150.0, 1e-6));
    }

    #[test]
    fn test_zoomed_at_center_keeps_center() {
        let vp = Viewport::new(Coordinate::new(10.0, 20.0), 8, 640.0, 480.0);
        let center = vp.zoomed_at(320.0, 240.0, 9);
        assert!(close(center.lat, 10.0, 1e-9));
        assert!(close(center.lng, 20.0, 1e-9));
    }
}
