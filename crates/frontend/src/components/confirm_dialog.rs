use dioxus::prelude::*;

#[component]
pub fn ConfirmDialog(
    #[props(into)] title: String,
    #[props(into)] description: String,
    on_confirm: EventHandler<()>,
    on_decline: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_decline.call(()),

            div {
                class: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "{title}" }
                p { "{description}" }

                div { class: "dialog-actions",
                    button {
                        class: "secondary",
                        onclick: move |_| on_decline.call(()),
                        "Não"
                    }
                    button {
                        class: "danger",
                        onclick: move |_| on_confirm.call(()),
                        "Sim"
                    }
                }
            }
        }
    }
}
