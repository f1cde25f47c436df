use crate::projection::{Viewport, TILE_SIZE};

/// One `{z}/{x}/{y}` tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

/// A tile placed in the container. `column` is the unwrapped tile column, so
/// tiles repeat horizontally across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub key: TileKey,
    pub column: i64,
    /// Container-relative position of the tile's top-left corner.
    pub left: f64,
    pub top: f64,
}

/// Tiles needed to cover the viewport, row by row.
pub fn visible_tiles(vp: &Viewport) -> Vec<PlacedTile> {
    if vp.width <= 0.0 || vp.height <= 0.0 {
        return Vec::new();
    }
    let n = 1i64 << vp.zoom;
    let (ox, oy) = vp.origin();

    let col_min = (ox / TILE_SIZE).floor() as i64;
    let col_max = ((ox + vp.width) / TILE_SIZE).ceil() as i64 - 1;
    let row_min = ((oy / TILE_SIZE).floor() as i64).max(0);
    let row_max = (((oy + vp.height) / TILE_SIZE).ceil() as i64 - 1).min(n - 1);

    let mut tiles = Vec::new();
    for row in row_min..=row_max {
        for col in col_min..=col_max {
            let x = col.rem_euclid(n) as u32;
            tiles.push(PlacedTile {
                key: TileKey {
                    x,
                    y: row as u32,
                    z: vp.zoom,
                },
                column: col,
                left: col as f64 * TILE_SIZE - ox,
                top: row as f64 * TILE_SIZE - oy,
            });
        }
    }
    tiles
}

/// Expand a `{s}/{z}/{x}/{y}` URL template. The subdomain rotates with
/// `x + y` so neighbouring tiles spread across hosts.
pub fn tile_url(template: &str, subdomains: &[String], key: TileKey) -> String {
    let mut url = template
        .replace("{z}", &key.z.to_string())
        .replace("{x}", &key.x.to_string())
        .replace("{y}", &key.y.to_string());
    if !subdomains.is_empty() {
        let idx = (key.x as usize + key.y as usize) % subdomains.len();
        url = url.replace("{s}", &subdomains[idx]);
    }
    url
}
