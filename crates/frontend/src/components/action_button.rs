use dioxus::prelude::*;

/// Build the inline style for an action button.
fn button_style(background: &str, border: &str, color: &str) -> String {
    format!("background: {background}; border: 1px solid {border}; color: {color};")
}

#[component]
pub fn ActionButton(
    #[props(into)] title: String,
    #[props(into)] background: String,
    #[props(into)] border: String,
    #[props(into)] color: String,
    icon: Asset,
    #[props(default)] selected: bool,
    onclick: EventHandler<()>,
) -> Element {
    let style = button_style(&background, &border, &color);

    rsx! {
        button {
            class: if selected { "action-button selected" } else { "action-button" },
            style: "{style}",
            onclick: move |_| onclick.call(()),
            img { src: icon, alt: "" }
            span { "{title}" }
        }
    }
}
