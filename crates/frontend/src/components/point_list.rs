use dioxus::prelude::*;
use pinmap_shared::models::PointId;
use pinmap_shared::store::{Action, MarkerStore};

use crate::pages::map_page::dispatch;

/// Clicking a row selects it; clicking the selected row deselects it.
fn row_click_action(selection: Option<PointId>, clicked: PointId) -> Action {
    if selection == Some(clicked) {
        Action::ClearSelection
    } else {
        Action::SelectPoint(clicked)
    }
}

#[component]
pub fn PointList(store: Signal<MarkerStore>) -> Element {
    let mut store = store;
    let points = store.read().points().to_vec();
    let selection = store.read().selection();

    rsx! {
        div { class: "panel point-list",
            h3 { "Pontos" }
            if points.is_empty() {
                p { class: "empty",
                    "Nenhum ponto adicionado. Use \"Adicionar Novo\" e clique no mapa."
                }
            }
            ul {
                for p in points {
                    li {
                        key: "{p.id}",
                        class: if p.selected { "point-row selected" } else { "point-row" },
                        onclick: move |_| dispatch(&mut store, row_click_action(selection, p.id)),
                        span { class: "point-label", {p.label()} }
                        span { class: "point-date", "{p.date}" }
                        span { class: "point-coord", "{p.coordinate}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_click_selects_other_point() {
        assert_eq!(
            row_click_action(Some(PointId(1)), PointId(2)),
            Action::SelectPoint(PointId(2))
        );
        assert_eq!(row_click_action(None, PointId(2)), Action::SelectPoint(PointId(2)));
    }

    #[test]
    fn test_row_click_on_selected_clears() {
        assert_eq!(row_click_action(Some(PointId(3)), PointId(3)), Action::ClearSelection);
    }
}
