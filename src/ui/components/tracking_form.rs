use dioxus::prelude::*;

/// Free-text tracking ID input. Stays editable while a lookup is running so a
/// new submission can supersede it.
#[component]
pub fn TrackingForm(value: Signal<String>, searching: bool, on_submit: EventHandler<String>) -> Element {
    let mut value = value;

    rsx! {
        form {
            class: "track-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(value());
            },
            div { class: "track-input",
                span { class: "track-input__icon", "⌕" }
                input {
                    r#type: "text",
                    placeholder: "Tracking ID",
                    aria_label: "Tracking ID",
                    autocomplete: "off",
                    spellcheck: false,
                    value: "{value}",
                    oninput: move |evt| value.set(evt.value()),
                }
            }
            button {
                r#type: "submit",
                class: "track-submit",
                if searching { "Tracking…" } else { "Track" }
            }
        }
    }
}
