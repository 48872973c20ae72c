//! In-memory tracking service used when no API endpoint is configured.

use std::time::Duration;

use time::OffsetDateTime;
use tracing::debug;

use crate::domain::{
    LookupFailure, LookupOutcome, ShipmentEvent, ShipmentLookup, ShipmentRecord, TrackingStatus,
};
use crate::util::local_now;

const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);
const SHIPMENT_PREFIX: &str = "SW-";
const OUTAGE_PREFIX: &str = "SW-DOWN";

/// Resolves `SW-` identifiers to a sample shipment; `SW-DOWN…` simulates an outage.
#[derive(Clone, Debug)]
pub struct DemoLookup {
    latency: Duration,
}

impl Default for DemoLookup {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }
}

impl DemoLookup {
    #[cfg(test)]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn resolve(&self, tracking_id: &str, now: OffsetDateTime) -> LookupOutcome {
        let normalized = tracking_id.to_ascii_uppercase();
        if normalized.starts_with(OUTAGE_PREFIX) {
            return Err(LookupFailure::ServiceUnavailable);
        }
        if !normalized.starts_with(SHIPMENT_PREFIX) {
            return Err(LookupFailure::NotFound);
        }
        sample_shipment(tracking_id, now).ok_or(LookupFailure::ServiceUnavailable)
    }
}

impl ShipmentLookup for DemoLookup {
    async fn lookup_shipment(&self, tracking_id: &str) -> LookupOutcome {
        debug!(tracking_id, latency_ms = self.latency.as_millis() as u64, "demo lookup");
        tokio::time::sleep(self.latency).await;
        self.resolve(tracking_id, local_now())
    }
}

fn sample_shipment(tracking_id: &str, now: OffsetDateTime) -> Option<ShipmentRecord> {
    let hours = |h: i64, m: i64| now - time::Duration::minutes(h * 60 + m);
    let events = vec![
        ShipmentEvent::new(hours(22, 0), TrackingStatus::PickedUp.label(), "Seller Warehouse")
            .with_status(TrackingStatus::PickedUp),
        ShipmentEvent::new(hours(18, 0), TrackingStatus::InTransit.label(), "Mumbai Gateway")
            .with_status(TrackingStatus::InTransit),
        ShipmentEvent::new(hours(4, 30), "Arrived at Sort Facility", "Bangalore Hub")
            .with_status(TrackingStatus::InTransit),
        ShipmentEvent::new(
            hours(1, 15),
            TrackingStatus::OutForDelivery.label(),
            "Bangalore Hub",
        )
        .with_status(TrackingStatus::OutForDelivery),
    ];
    ShipmentRecord::new(tracking_id, now + time::Duration::minutes(45), events).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-10-18 15:00 +05:30);

    #[test]
    fn sample_ids_resolve_to_four_checkpoints() {
        let record = DemoLookup::default().resolve("sw-123456789", NOW).unwrap();
        assert_eq!(record.tracking_id(), "sw-123456789");
        assert_eq!(record.events().len(), 4);
        assert!(record
            .events()
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
        assert_eq!(record.current_event().unwrap().status_label, "Out for Delivery");
    }

    #[test]
    fn other_ids_are_unknown_or_unavailable() {
        let demo = DemoLookup::default();
        assert_eq!(demo.resolve("BAD-ID", NOW), Err(LookupFailure::NotFound));
        assert_eq!(
            demo.resolve("SW-DOWN-1", NOW),
            Err(LookupFailure::ServiceUnavailable)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_waits_for_latency() {
        let demo = DemoLookup::with_latency(Duration::from_millis(250));
        let started = tokio::time::Instant::now();
        let outcome = demo.lookup_shipment("SW-1").await;
        assert!(outcome.is_ok());
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
