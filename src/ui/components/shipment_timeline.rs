use dioxus::prelude::*;

use crate::{
    domain::{expected_delivery_label, newest_first, render, ShipmentRecord},
    ui::theme,
    util::local_now,
};

#[component]
pub fn ShipmentTimeline(shipment: ShipmentRecord) -> Element {
    let now = local_now();
    let expected = expected_delivery_label(&shipment, now);
    let rows = newest_first(render(&shipment, now));
    let tracking_id = shipment.tracking_id().to_string();

    rsx! {
        section { class: "shipment-card",
            header { class: "shipment-card__header",
                div {
                    div { class: "label", "Expected Delivery" }
                    div { class: "expected-delivery", "{expected}" }
                }
                div { class: "shipment-card__id",
                    div { class: "label", "Tracking ID" }
                    div { class: "tracking-id", "{tracking_id}" }
                }
            }
            ol { class: "timeline",
                for (idx, row) in rows.into_iter().enumerate() {
                    li {
                        key: "{idx}",
                        class: theme::row_class(&row),
                        span { class: theme::dot_class(&row) }
                        div { class: "timeline-status", "{row.status_label}" }
                        div { class: "timeline-meta", "{row.location} • {row.time_label}" }
                    }
                }
            }
        }
    }
}
