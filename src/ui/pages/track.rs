use dioxus::prelude::*;

use crate::{
    app::LookupSettings,
    domain::{perform_lookup, LookupController, LookupFailure, Resolution},
    ui::components::{
        toast::{push_toast, ToastKind, ToastMessage},
        LookupStatus, TrackingForm,
    },
};

#[component]
pub fn TrackPage() -> Element {
    let settings = use_context::<LookupSettings>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut controller = use_signal(LookupController::new);
    let input = use_signal(String::new);
    let demo_mode = settings.backend.is_demo();

    let submit = use_callback(move |raw: String| {
        // Blank input and duplicate submits are logged by the controller.
        let Some(ticket) = controller.with_mut(|c| c.submit(&raw)) else {
            return;
        };
        let settings = settings.clone();
        let mut controller = controller;
        spawn(async move {
            let outcome = perform_lookup(&settings.backend, &ticket, settings.timeout).await;
            let unavailable = matches!(outcome, Err(LookupFailure::ServiceUnavailable));
            let resolution = controller.with_mut(|c| c.resolve(&ticket, outcome));
            if resolution == Resolution::Applied && unavailable {
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    "Tracking service is unavailable right now. You can retry the lookup.",
                );
            }
        });
    });

    let state = controller.read().state().clone();
    let searching = state.is_searching();

    rsx! {
        div { class: "track-page",
            div { class: "track-hero",
                h1 { "Track your shipment" }
                p { class: "label", "Enter your tracking ID (e.g., SW-123456789)" }
                TrackingForm {
                    value: input,
                    searching,
                    on_submit: submit,
                }
                if demo_mode {
                    p { class: "demo-note", "Demo mode: sample shipments only." }
                }
            }
            LookupStatus {
                state,
                on_retry: submit,
            }
        }
    }
}
