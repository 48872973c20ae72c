use dioxus::prelude::*;

use crate::app::Route;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let version = version_label();

    rsx! {
        div { class: "shell",
            header { class: "shell-header",
                div { class: "shell-header__inner",
                    span { class: "brand", "{APP_NAME}" }
                    nav {
                        Link { class: "nav-link", to: Route::Track {}, "Track Order" }
                    }
                }
            }
            main { class: "shell-main", {children} }
            footer { class: "shell-footer", "{APP_NAME} · {version}" }
        }
    }
}
