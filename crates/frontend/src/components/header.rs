use dioxus::prelude::*;

fn count_label(point_count: usize) -> String {
    match point_count {
        0 => "Nenhum ponto".to_string(),
        1 => "1 ponto".to_string(),
        n => format!("{n} pontos"),
    }
}

#[component]
pub fn Header(point_count: usize) -> Element {
    let label = count_label(point_count);

    rsx! {
        div { class: "header",
            h1 { "Mapa de Pontos" }
            span { class: "point-count", "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0), "Nenhum ponto");
        assert_eq!(count_label(1), "1 ponto");
        assert_eq!(count_label(12), "12 pontos");
    }
}
