use std::time::Duration;

use dioxus::prelude::*;
use tracing::error;

use crate::{
    infra::LookupBackend,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::TrackPage,
        shell::Shell,
    },
    util::{assets, config::TrackerConfig},
};

/// Lookup service and its wait ceiling, shared with the tracking page.
#[derive(Clone)]
pub struct LookupSettings {
    pub backend: LookupBackend,
    pub timeout: Duration,
    /// Startup problem to surface once the UI is up.
    pub warning: Option<String>,
}

impl LookupSettings {
    pub fn from_config(config: &TrackerConfig) -> Self {
        let timeout = config.lookup_timeout();
        match LookupBackend::from_config(config) {
            Ok(backend) => Self {
                backend,
                timeout,
                warning: None,
            },
            Err(err) => {
                error!(error = %err, "tracking API is misconfigured; lookups will fail");
                Self {
                    backend: LookupBackend::Offline,
                    timeout,
                    warning: Some(format!("Tracking API is misconfigured: {err}")),
                }
            }
        }
    }
}

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/track")]
    Track {},
}

#[component]
pub fn App() -> Element {
    let settings = use_hook(|| LookupSettings::from_config(&TrackerConfig::load()));
    use_context_provider(|| settings.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    use_effect({
        let warning = settings.warning.clone();
        move || {
            if let Some(warning) = warning.clone() {
                push_toast(toasts, ToastKind::Error, warning);
            }
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Track() -> Element {
    rsx! { Shell { TrackPage {} } }
}
