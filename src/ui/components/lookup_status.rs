use dioxus::prelude::*;

use crate::{
    domain::{LookupFailure, LookupState},
    ui::{components::ShipmentTimeline, theme},
};

/// Read-only view of the current lookup state.
#[component]
pub fn LookupStatus(state: LookupState, on_retry: EventHandler<String>) -> Element {
    match state {
        LookupState::Idle => rsx! { Fragment {} },
        LookupState::Searching { query } => rsx! {
            div { class: "lookup-searching", role: "status",
                div { class: "spinner" }
                p { class: "label", "Looking up {query}…" }
            }
        },
        LookupState::Failed { query, reason } => rsx! {
            LookupError { query: query.to_string(), reason, on_retry }
        },
        LookupState::Found { shipment, .. } => rsx! {
            ShipmentTimeline { shipment }
        },
    }
}

#[component]
fn LookupError(query: String, reason: LookupFailure, on_retry: EventHandler<String>) -> Element {
    let (title, detail) = failure_copy(reason, &query);
    let retry_query = query.clone();

    rsx! {
        div { class: theme::failure_class(reason), role: "alert",
            h2 { "{title}" }
            p { "{detail}" }
            if reason == LookupFailure::ServiceUnavailable {
                button {
                    class: "track-retry",
                    onclick: move |_| on_retry.call(retry_query.clone()),
                    "Try again"
                }
            }
        }
    }
}

fn failure_copy(reason: LookupFailure, query: &str) -> (&'static str, String) {
    match reason {
        LookupFailure::NotFound => (
            "Shipment not found",
            format!("We couldn't find a shipment for \"{query}\". Check the tracking ID and search again."),
        ),
        LookupFailure::ServiceUnavailable => (
            "Tracking is temporarily unavailable",
            format!("We couldn't reach the tracking service while looking up \"{query}\". Please try again in a moment."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_copy_names_the_query() {
        let (title, detail) = failure_copy(LookupFailure::NotFound, "BAD-ID");
        assert_eq!(title, "Shipment not found");
        assert!(detail.contains("\"BAD-ID\""));

        let (title, detail) = failure_copy(LookupFailure::ServiceUnavailable, "SW-1");
        assert_eq!(title, "Tracking is temporarily unavailable");
        assert!(detail.contains("try again"));
    }
}
