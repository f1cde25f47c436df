use pinmap_shared::models::Coordinate;
use pinmap_shared::projection::Viewport;

/// Convert client (viewport) coordinates to container-relative pixel coordinates.
pub fn client_to_container(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

/// Pure function: coordinate under a container-relative point for a map
/// centered on `center` at `zoom`. Usable in unit tests (no web_sys dependency).
pub fn container_to_coordinate(
    container_x: f64,
    container_y: f64,
    container_w: f64,
    container_h: f64,
    center: Coordinate,
    zoom: u8,
) -> Option<Coordinate> {
    if container_w <= 0.0 || container_h <= 0.0 {
        return None;
    }
    let vp = Viewport::new(center, zoom, container_w, container_h);
    Some(vp.to_coordinate(container_x, container_y))
}

/// Bounding client rect of the element with `container_id`.
pub fn element_rect(container_id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    Some(element.get_bounding_client_rect())
}

/// Get container-relative click coordinates using web_sys.
pub fn click_to_container(client_x: f64, client_y: f64, container_id: &str) -> Option<(f64, f64)> {
    let rect = element_rect(container_id)?;
    Some(client_to_container(client_x, client_y, rect.left(), rect.top()))
}

/// Get the map coordinate under a click using the live container size.
pub fn click_to_coordinate(
    client_x: f64,
    client_y: f64,
    container_id: &str,
    center: Coordinate,
    zoom: u8,
) -> Option<Coordinate> {
    let rect = element_rect(container_id)?;
    let (x, y) = client_to_container(client_x, client_y, rect.left(), rect.top());
    container_to_coordinate(x, y, rect.width(), rect.height(), center, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_container_origin() {
        let (x, y) = client_to_container(100.0, 200.0, 100.0, 200.0);
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_container_offset() {
        let (x, y) = client_to_container(450.0, 350.0, 320.0, 50.0);
        assert!((x - 130.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_container_center_is_map_center() {
        let center = Coordinate::new(-15.185309410095217, -53.58890914916992);
        let c = container_to_coordinate(400.0, 300.0, 800.0, 600.0, center, 15).unwrap();
        assert!((c.lat - center.lat).abs() < 1e-9);
        assert!((c.lng - center.lng).abs() < 1e-9);
    }

    #[test]
    fn test_container_right_of_center_is_east() {
        let center = Coordinate::new(-15.18, -53.58);
        let c = container_to_coordinate(700.0, 300.0, 800.0, 600.0, center, 15).unwrap();
        assert!(c.lng > center.lng);
        assert!((c.lat - center.lat).abs() < 1e-9);
    }

    #[test]
    fn test_container_below_center_is_south() {
        let center = Coordinate::new(-15.18, -53.58);
        let c = container_to_coordinate(400.0, 500.0, 800.0, 600.0, center, 15).unwrap();
        assert!(c.lat < center.lat);
    }

    #[test]
    fn test_container_to_coordinate_invalid_container() {
        let center = Coordinate::new(0.0, 0.0);
        assert!(container_to_coordinate(10.0, 10.0, 0.0, 600.0, center, 5).is_none());
        assert!(container_to_coordinate(10.0, 10.0, 800.0, 0.0, center, 5).is_none());
    }
}
