use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use pinmap_shared::config::{IconConfig, MapConfig};
use pinmap_shared::models::{Coordinate, Point, PointId};
use pinmap_shared::projection::{Viewport, TILE_SIZE};
use pinmap_shared::store::{Action, MarkerStore};
use pinmap_shared::tiles::{self, PlacedTile};

use crate::coords;
use crate::pages::map_page::dispatch;

const MAP_CONTAINER_ID: &str = "pin-map-container";

/// Pointer movement in pixels below which a press counts as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Same for touch, which is less precise.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

/// Container size assumed until the element has been measured.
const FALLBACK_SIZE: (f64, f64) = (960.0, 600.0);

const MARKER_ICON: Asset = asset!("/assets/icons/marker.svg");
const MARKER_SELECTED_ICON: Asset = asset!("/assets/icons/marker-selected.svg");

/// A mouse press that started on a marker.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MarkerPress {
    id: PointId,
    start: (f64, f64),
    /// Pointer position minus the marker tip, in container pixels.
    grab_offset: (f64, f64),
    draggable: bool,
    moved: bool,
}

/// A single finger that went down on a marker.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MarkerTouch {
    id: PointId,
    start: (f64, f64),
    last: (f64, f64),
}

/// Everything needed to draw one marker.
#[derive(Debug, Clone, PartialEq)]
struct MarkerView {
    id: PointId,
    selected: bool,
    label: String,
    /// Container position of the icon tip.
    tip: (f64, f64),
    style: String,
}

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Live width/height of the map container element.
fn container_size() -> Option<(f64, f64)> {
    let rect = coords::element_rect(MAP_CONTAINER_ID)?;
    Some((rect.width(), rect.height()))
}

// ---------------------------------------------------------------------------
// Zoom / pan math (pure functions, easily testable)
// ---------------------------------------------------------------------------

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Distance between two client-coordinate points.
fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Whether a pointer moved far enough from `start` to count as a drag.
fn exceeds_threshold(start: (f64, f64), current: (f64, f64), threshold: f64) -> bool {
    (current.0 - start.0).abs() > threshold || (current.1 - start.1).abs() > threshold
}

/// A finger lifted from a marker selects it unless it slid away first.
fn marker_tap_action(touch: &MarkerTouch) -> Option<Action> {
    if point_distance(touch.start, touch.last) > TOUCH_DRAG_THRESHOLD {
        None
    } else {
        Some(Action::SelectPoint(touch.id))
    }
}

// ---------------------------------------------------------------------------
// Layer builders
// ---------------------------------------------------------------------------

fn tile_style(tile: &PlacedTile) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;",
        tile.left, tile.top, TILE_SIZE, TILE_SIZE
    )
}

/// Build the outline overlay as a standalone SVG string. Positions are
/// container pixels.
fn build_outline_svg(outline_px: &[(f64, f64)], color: &str, width: f64, height: f64) -> String {
    if outline_px.len() < 2 {
        return String::new();
    }
    let points = outline_px
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" style="position:absolute;top:0;left:0;pointer-events:none;"><polygon points="{points}" fill="{color}" fill-opacity="0.2" stroke="{color}" stroke-width="3" stroke-linejoin="round"/></svg>"#
    )
}

/// Absolute placement of a marker icon whose tip sits at `(x, y)`.
fn marker_style(x: f64, y: f64, icon: &IconConfig) -> String {
    format!(
        "left:{:.1}px;top:{:.1}px;width:{}px;height:{}px;",
        x - icon.anchor_x,
        y - icon.anchor_y,
        icon.width,
        icon.height
    )
}

/// Marker views in insertion order. A marker being dragged is drawn at its
/// preview position instead of its stored one.
fn marker_views(
    points: &[Point],
    vp: &Viewport,
    icon: &IconConfig,
    preview: Option<(PointId, Coordinate)>,
) -> Vec<MarkerView> {
    points
        .iter()
        .map(|p| {
            let coordinate = match preview {
                Some((id, c)) if id == p.id => c,
                _ => p.coordinate,
            };
            let tip = vp.to_container(coordinate);
            MarkerView {
                id: p.id,
                selected: p.selected,
                label: p.label(),
                tip,
                style: marker_style(tip.0, tip.1, icon),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(store: Signal<MarkerStore>, config: MapConfig, outline: Vec<Coordinate>) -> Element {
    let home_center = config.center;
    let home_zoom = config.zoom;
    let zoom_range = config.zoom_range();
    let icon = config.marker_icon;
    let mut store = store;

    let mut center = use_signal(|| home_center);
    let mut zoom = use_signal(|| home_zoom);
    let mut size = use_signal(|| FALLBACK_SIZE);

    // Measure once mounted; `onresize` keeps it current afterwards.
    use_effect(move || {
        if let Some(s) = container_size() {
            size.set(s);
        }
    });

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_center = use_signal(|| home_center);

    // Marker press / drag state
    let mut marker_press = use_signal(|| None::<MarkerPress>);
    let mut drag_preview = use_signal(|| None::<(PointId, Coordinate)>);
    let mut marker_touch = use_signal(|| None::<MarkerTouch>);

    // Touch state
    let mut touch_start_pos = use_signal(|| None::<(f64, f64)>);
    let mut touch_did_pan = use_signal(|| false);
    let mut touch_start_center = use_signal(|| home_center);

    let outline_color = config.outline_color.clone();
    let outline_svg = use_memo(move || {
        let (w, h) = *size.read();
        let vp = Viewport::new(*center.read(), *zoom.read(), w, h);
        let outline_px: Vec<(f64, f64)> = outline.iter().map(|c| vp.to_container(*c)).collect();
        build_outline_svg(&outline_px, &outline_color, w, h)
    });

    let cur_center = *center.read();
    let cur_zoom = *zoom.read();
    let (width, height) = *size.read();
    let viewport = Viewport::new(cur_center, cur_zoom, width, height);

    let tile_views: Vec<(String, String, String)> = tiles::visible_tiles(&viewport)
        .iter()
        .map(|t| {
            (
                format!("{}/{}/{}", t.key.z, t.column, t.key.y),
                tiles::tile_url(&config.tile_url, &config.subdomains, t.key),
                tile_style(t),
            )
        })
        .collect();

    let markers = marker_views(store.read().points(), &viewport, &icon, *drag_preview.read());
    let add_mode = store.read().is_add_mode();
    let container_class = if *is_dragging.read() && *did_drag.read() {
        "map-container dragging"
    } else if marker_press.read().is_some_and(|p| p.moved) {
        "map-container dragging-marker"
    } else if add_mode {
        "map-container add-mode"
    } else {
        "map-container"
    };
    let attribution = config.attribution.clone();

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onresize: move |_| {
                if let Some(s) = container_size() {
                    size.set(s);
                }
            },

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();

                let delta_y = wheel_delta_y(evt.data().delta());
                let step = if delta_y < 0.0 { 1 } else { -1 };
                let old_z = *zoom.read();
                let new_z = zoom_range.clamp(old_z as i32 + step);
                if new_z == old_z {
                    return;
                }

                let Some(rect) = coords::element_rect(MAP_CONTAINER_ID) else { return };
                let client = evt.data().client_coordinates();
                let (cx, cy) = coords::client_to_container(client.x, client.y, rect.left(), rect.top());
                let vp = Viewport::new(*center.read(), old_z, rect.width(), rect.height());
                center.set(vp.zoomed_at(cx, cy, new_z));
                zoom.set(new_z);
            },

            onmousedown: move |evt: Event<MouseData>| {
                // Only track drag/click for left mouse button
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start.set((client.x, client.y));
                drag_start_center.set(*center.read());
            },

            onmousemove: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                let cur = (client.x, client.y);

                // Dragging a selected marker
                let press = *marker_press.read();
                if let Some(mut press) = press {
                    if !press.draggable {
                        return;
                    }
                    if !press.moved && exceeds_threshold(press.start, cur, DRAG_THRESHOLD) {
                        press.moved = true;
                        marker_press.set(Some(press));
                    }
                    if press.moved {
                        if let Some((px, py)) = coords::click_to_container(client.x, client.y, MAP_CONTAINER_ID) {
                            let (w, h) = *size.read();
                            let vp = Viewport::new(*center.read(), *zoom.read(), w, h);
                            let tip = vp.to_coordinate(px - press.grab_offset.0, py - press.grab_offset.1);
                            drag_preview.set(Some((press.id, tip)));
                        }
                    }
                    return;
                }

                if !*is_dragging.read() {
                    return;
                }
                let start = *drag_start.read();
                if !*did_drag.read() && exceeds_threshold(start, cur, DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let (w, h) = *size.read();
                    let vp = Viewport::new(*drag_start_center.read(), *zoom.read(), w, h);
                    center.set(vp.panned(cur.0 - start.0, cur.1 - start.1));
                }
            },

            onmouseup: move |evt: Event<MouseData>| {
                let was_dragging = *is_dragging.read();
                let was_drag = *did_drag.read();
                is_dragging.set(false);

                // Release after pressing a marker: drop it or select it.
                let press = *marker_press.read();
                if let Some(press) = press {
                    marker_press.set(None);
                    if press.moved {
                        let preview = *drag_preview.read();
                        drag_preview.set(None);
                        if let Some((id, coordinate)) = preview {
                            tracing::info!(%id, lat = coordinate.lat, lng = coordinate.lng, "Marker dragged");
                            dispatch(&mut store, Action::MovePoint { id, coordinate });
                        }
                    } else {
                        dispatch(&mut store, Action::SelectPoint(press.id));
                    }
                    return;
                }

                // A mouseup without drag movement = a click
                if was_dragging && !was_drag && store.read().is_add_mode() {
                    let client = evt.client_coordinates();
                    if let Some(coordinate) = coords::click_to_coordinate(
                        client.x, client.y, MAP_CONTAINER_ID,
                        *center.read(), *zoom.read(),
                    ) {
                        let created_at = chrono::Local::now().naive_local();
                        dispatch(&mut store, Action::AddPoint { coordinate, created_at });
                    }
                }
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
                marker_press.set(None);
                drag_preview.set(None);
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                // In add mode both clicks already placed points; keep the view.
                if store.read().is_add_mode() {
                    return;
                }
                center.set(home_center);
                zoom.set(home_zoom);
            },

            // --- Touch event handlers ---

            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() == 1 {
                    let t = &touches[0];
                    touch_start_pos.set(Some((t.client_coordinates().x, t.client_coordinates().y)));
                    touch_did_pan.set(false);
                    touch_start_center.set(*center.read());
                } else {
                    // Multi-touch is not a tap
                    touch_start_pos.set(None);
                    touch_did_pan.set(true);
                }
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() != 1 {
                    return;
                }
                let t = &touches[0];
                let cur = (t.client_coordinates().x, t.client_coordinates().y);
                if let Some(start) = *touch_start_pos.read() {
                    if !*touch_did_pan.read() && point_distance(start, cur) > TOUCH_DRAG_THRESHOLD {
                        touch_did_pan.set(true);
                    }
                    if *touch_did_pan.read() {
                        let (w, h) = *size.read();
                        let vp = Viewport::new(*touch_start_center.read(), *zoom.read(), w, h);
                        center.set(vp.panned(cur.0 - start.0, cur.1 - start.1));
                    }
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let remaining = evt.data().touches().len();

                // Single-finger tap: if no pan occurred and all fingers are up, treat as tap
                if remaining == 0 && !*touch_did_pan.read() && store.read().is_add_mode() {
                    if let Some(start) = *touch_start_pos.read() {
                        if let Some(coordinate) = coords::click_to_coordinate(
                            start.0, start.1, MAP_CONTAINER_ID,
                            *center.read(), *zoom.read(),
                        ) {
                            let created_at = chrono::Local::now().naive_local();
                            dispatch(&mut store, Action::AddPoint { coordinate, created_at });
                        }
                    }
                }

                if remaining == 0 {
                    touch_start_pos.set(None);
                }
            },

            ontouchcancel: move |_evt: Event<TouchData>| {
                touch_start_pos.set(None);
                touch_did_pan.set(false);
            },

            // Tile layer
            div { class: "tile-layer",
                for (key, url, style) in tile_views {
                    img {
                        key: "{key}",
                        class: "tile",
                        src: "{url}",
                        style: "{style}",
                        draggable: "false",
                        alt: "",
                    }
                }
            }

            // Outline overlay
            div {
                class: "outline-layer",
                dangerous_inner_html: "{outline_svg}",
            }

            // Markers
            div { class: "marker-layer",
                for m in markers {
                    img {
                        key: "{m.id}",
                        class: if m.selected { "marker selected" } else { "marker" },
                        src: if m.selected { MARKER_SELECTED_ICON } else { MARKER_ICON },
                        style: "{m.style}",
                        title: "{m.label}",
                        draggable: "false",
                        onmousedown: move |evt: Event<MouseData>| {
                            evt.stop_propagation();
                            if evt.trigger_button() != Some(MouseButton::Primary) {
                                return;
                            }
                            let client = evt.client_coordinates();
                            let grab_offset = coords::click_to_container(client.x, client.y, MAP_CONTAINER_ID)
                                .map(|(px, py)| (px - m.tip.0, py - m.tip.1))
                                .unwrap_or((0.0, 0.0));
                            marker_press.set(Some(MarkerPress {
                                id: m.id,
                                start: (client.x, client.y),
                                grab_offset,
                                draggable: m.selected,
                                moved: false,
                            }));
                        },
                        // Marker touches never reach the map's pan/add handlers.
                        ontouchstart: move |evt: Event<TouchData>| {
                            evt.stop_propagation();
                            let touches = evt.data().touches();
                            if touches.len() == 1 {
                                let c = touches[0].client_coordinates();
                                marker_touch.set(Some(MarkerTouch {
                                    id: m.id,
                                    start: (c.x, c.y),
                                    last: (c.x, c.y),
                                }));
                            } else {
                                marker_touch.set(None);
                            }
                        },
                        ontouchmove: move |evt: Event<TouchData>| {
                            evt.stop_propagation();
                            let touches = evt.data().touches();
                            let current = *marker_touch.read();
                            if let (Some(mut touch), Some(t)) = (current, touches.first()) {
                                let c = t.client_coordinates();
                                touch.last = (c.x, c.y);
                                marker_touch.set(Some(touch));
                            }
                        },
                        ontouchend: move |evt: Event<TouchData>| {
                            evt.stop_propagation();
                            // Handled here, so skip the emulated mouse events.
                            evt.prevent_default();
                            let touch = *marker_touch.read();
                            marker_touch.set(None);
                            if let Some(action) = touch.as_ref().and_then(marker_tap_action) {
                                dispatch(&mut store, action);
                            }
                        },
                        ontouchcancel: move |evt: Event<TouchData>| {
                            evt.stop_propagation();
                            marker_touch.set(None);
                        },
                    }
                }
            }

            if add_mode {
                div { class: "map-hint", "Clique no mapa para adicionar um ponto" }
            }

            // Controls sit outside the pan/click handling.
            div {
                class: "zoom-controls",
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                onmouseup: move |evt: Event<MouseData>| evt.stop_propagation(),
                ondoubleclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                button {
                    title: "Aproximar",
                    onclick: move |_| {
                        let z = *zoom.read();
                        zoom.set(zoom_range.clamp(z as i32 + 1));
                    },
                    "+"
                }
                button {
                    title: "Afastar",
                    onclick: move |_| {
                        let z = *zoom.read();
                        zoom.set(zoom_range.clamp(z as i32 - 1));
                    },
                    "−"
                }
            }

            div {
                class: "attribution",
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                onmouseup: move |evt: Event<MouseData>| evt.stop_propagation(),
                dangerous_inner_html: "{attribution}",
            }
        }
    }
}
