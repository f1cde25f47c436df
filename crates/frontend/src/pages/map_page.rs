use dioxus::prelude::*;
use pinmap_shared::config::MapConfig;
use pinmap_shared::geo;
use pinmap_shared::models::Coordinate;
use pinmap_shared::store::{Action, MarkerStore, CONFIRM_TITLE};

use crate::components::action_button::ActionButton;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::header::Header;
use crate::components::map_view::MapView;
use crate::components::point_list::PointList;

const MAP_CONFIG_JSON: &str = include_str!("../../assets/config/map.json");
const OUTLINE_JSON: &str = include_str!("../../assets/config/geo.json");

const PIN_ICON: Asset = asset!("/assets/icons/pin.svg");
const TRASH_ICON: Asset = asset!("/assets/icons/trash.svg");

/// Apply an action to the shared store. Rejections only happen when a
/// trigger was reachable that should not have been, so they are just logged.
pub fn dispatch(store: &mut Signal<MarkerStore>, action: Action) {
    let result = store.write().apply(action.clone());
    if let Err(rejected) = result {
        tracing::debug!(?action, %rejected, "Ignored action");
    }
}

fn load_config(data: &str) -> MapConfig {
    MapConfig::from_json(data).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid map config, using defaults");
        MapConfig::default()
    })
}

fn load_outline(data: &str) -> Vec<Coordinate> {
    geo::load_outline(data).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid outline, drawing none");
        Vec::new()
    })
}

/// Keyboard shortcuts: Esc declines the dialog or clears the selection,
/// Delete/Backspace asks to delete the selection.
fn key_action(key: &str, dialog_open: bool) -> Option<Action> {
    match key {
        "Escape" if dialog_open => Some(Action::Decline),
        "Escape" => Some(Action::ClearSelection),
        "Delete" | "Backspace" if !dialog_open => Some(Action::RequestDeleteSelected),
        _ => None,
    }
}

#[component]
pub fn MapPage() -> Element {
    let mut store = use_signal(MarkerStore::new);
    let config = use_hook(|| load_config(MAP_CONFIG_JSON));
    let outline = use_hook(|| load_outline(OUTLINE_JSON));

    let (point_count, add_mode, can_delete_selected, can_delete_all, message) = {
        let s = store.read();
        (
            s.len(),
            s.is_add_mode(),
            s.can_delete_selected(),
            s.can_delete_all(),
            s.confirmation_message(),
        )
    };

    rsx! {
        div {
            class: "app",
            tabindex: "0",
            onkeydown: move |evt: Event<KeyboardData>| {
                let key = evt.key().to_string();
                let dialog_open = store.read().is_dialog_open();
                if let Some(action) = key_action(&key, dialog_open) {
                    evt.prevent_default();
                    dispatch(&mut store, action);
                }
            },

            Header { point_count }

            div { class: "content",
                div { class: "sidebar",
                    PointList { store }
                }

                div { class: "map-area",
                    MapView {
                        store,
                        config: config.clone(),
                        outline: outline.clone(),
                    }

                    div { class: "container-buttons",
                        if can_delete_selected {
                            ActionButton {
                                title: "Deletar Pin",
                                background: "#D20200",
                                border: "#D20200",
                                color: "#ffffff",
                                icon: TRASH_ICON,
                                onclick: move |_| dispatch(&mut store, Action::RequestDeleteSelected),
                            }
                        }

                        ActionButton {
                            title: "Adicionar Novo",
                            background: "#ffffff",
                            border: "#C8CED8",
                            color: "#1f2729",
                            icon: PIN_ICON,
                            selected: add_mode,
                            onclick: move |_| dispatch(&mut store, Action::ToggleAddMode),
                        }

                        if can_delete_all {
                            ActionButton {
                                title: "Deletar Todos",
                                background: "#D20200",
                                border: "#D20200",
                                color: "#ffffff",
                                icon: TRASH_ICON,
                                onclick: move |_| dispatch(&mut store, Action::RequestDeleteAll),
                            }
                        }
                    }
                }
            }

            if let Some(description) = message {
                ConfirmDialog {
                    title: CONFIRM_TITLE,
                    description,
                    on_confirm: move |_| dispatch(&mut store, Action::Confirm),
                    on_decline: move |_| dispatch(&mut store, Action::Decline),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_declines_open_dialog() {
        assert_eq!(key_action("Escape", true), Some(Action::Decline));
    }

    #[test]
    fn test_escape_clears_selection_when_idle() {
        assert_eq!(key_action("Escape", false), Some(Action::ClearSelection));
    }

    #[test]
    fn test_delete_keys_request_delete() {
        assert_eq!(key_action("Delete", false), Some(Action::RequestDeleteSelected));
        assert_eq!(key_action("Backspace", false), Some(Action::RequestDeleteSelected));
        assert_eq!(key_action("Delete", true), None);
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(key_action("a", false), None);
    }

    #[test]
    fn test_bundled_config_loads() {
        let config = load_config(MAP_CONFIG_JSON);
        assert_eq!(config.zoom, 15);
        assert_eq!(config.min_zoom, 3);
        assert!((config.center.lat - -15.185309410095217).abs() < 1e-12);
    }

    #[test]
    fn test_bad_config_falls_back_to_defaults() {
        assert_eq!(load_config("{"), MapConfig::default());
        assert!(load_outline(r#"{"features":[]}"#).is_empty());
    }

    #[test]
    fn test_bundled_outline_loads() {
        assert!(load_outline(OUTLINE_JSON).len() >= 4);
    }
}
