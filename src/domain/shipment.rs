use std::fmt;

use thiserror::Error;
use time::OffsetDateTime;

/// A trimmed, non-empty tracking identifier ready to be sent to the lookup service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackingQuery(String);

impl TrackingQuery {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw_input: &str) -> Option<Self> {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checkpoint states reported by the order backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackingStatus {
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Failed,
}

impl TrackingStatus {
    /// Parses backend codes such as `OUT_FOR_DELIVERY` (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PICKED_UP" => Some(Self::PickedUp),
            "IN_TRANSIT" => Some(Self::InTransit),
            "OUT_FOR_DELIVERY" => Some(Self::OutForDelivery),
            "DELIVERED" => Some(Self::Delivered),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PickedUp => "Picked Up",
            Self::InTransit => "In Transit",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Failed => "Delivery Failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShipmentEvent {
    pub timestamp: OffsetDateTime,
    pub status_label: String,
    pub location: String,
    pub status: Option<TrackingStatus>,
}

impl ShipmentEvent {
    pub fn new(
        timestamp: OffsetDateTime,
        status_label: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            status_label: status_label.into(),
            location: location.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: TrackingStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("shipment record has no events")]
    NoEvents,
    #[error("current event index {index} out of range for {len} events")]
    CurrentOutOfRange { index: usize, len: usize },
}

/// Result of a successful lookup. Events are ordered oldest to newest and never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ShipmentRecord {
    tracking_id: String,
    expected_delivery: OffsetDateTime,
    events: Vec<ShipmentEvent>,
    /// Explicit current marker from upstream; overrides the positional default.
    current: Option<usize>,
}

impl ShipmentRecord {
    pub fn new(
        tracking_id: impl Into<String>,
        expected_delivery: OffsetDateTime,
        events: Vec<ShipmentEvent>,
    ) -> Result<Self, RecordError> {
        if events.is_empty() {
            return Err(RecordError::NoEvents);
        }
        Ok(Self {
            tracking_id: tracking_id.into(),
            expected_delivery,
            events,
            current: None,
        })
    }

    /// Marks a specific event as current, e.g. after a late-arriving scan.
    pub fn with_current(mut self, index: usize) -> Result<Self, RecordError> {
        if index >= self.events.len() {
            return Err(RecordError::CurrentOutOfRange {
                index,
                len: self.events.len(),
            });
        }
        self.current = Some(index);
        Ok(self)
    }

    /// Skips validation so tests can build records upstream never sends.
    #[cfg(test)]
    pub(crate) fn unchecked(
        tracking_id: impl Into<String>,
        expected_delivery: OffsetDateTime,
        events: Vec<ShipmentEvent>,
    ) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            expected_delivery,
            events,
            current: None,
        }
    }

    pub fn tracking_id(&self) -> &str {
        &self.tracking_id
    }

    pub fn expected_delivery(&self) -> OffsetDateTime {
        self.expected_delivery
    }

    pub fn events(&self) -> &[ShipmentEvent] {
        &self.events
    }

    pub fn current_index(&self) -> usize {
        self.current
            .unwrap_or_else(|| self.events.len().saturating_sub(1))
    }

    #[cfg(test)]
    pub fn current_event(&self) -> Option<&ShipmentEvent> {
        self.events.get(self.current_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use time::macros::datetime;

    fn event(label: &str) -> ShipmentEvent {
        ShipmentEvent::new(datetime!(2026-10-18 10:30 UTC), label, "Bangalore Hub")
    }

    #[test]
    fn query_is_trimmed_and_rejects_blank_input() {
        assert_eq!(
            TrackingQuery::parse("  SW-123456789 \n").map(|q| q.to_string()),
            Some("SW-123456789".to_string())
        );
        assert!(TrackingQuery::parse("").is_none());
        assert!(TrackingQuery::parse(" \t ").is_none());
    }

    #[test]
    fn record_requires_events() {
        let result = ShipmentRecord::new("SW-1", datetime!(2026-10-18 14:30 UTC), Vec::new());
        assert_eq!(result, Err(RecordError::NoEvents));
    }

    #[test]
    fn current_defaults_to_last_event() {
        let record = ShipmentRecord::new(
            "SW-1",
            datetime!(2026-10-18 14:30 UTC),
            vec![event("Picked Up"), event("In Transit")],
        )
        .unwrap();
        assert_eq!(record.current_index(), 1);
        assert_eq!(record.current_event().unwrap().status_label, "In Transit");
    }

    #[test]
    fn explicit_current_marker_is_validated() {
        let record = ShipmentRecord::new(
            "SW-1",
            datetime!(2026-10-18 14:30 UTC),
            vec![event("Picked Up"), event("In Transit")],
        )
        .unwrap();

        assert_eq!(
            record.clone().with_current(2),
            Err(RecordError::CurrentOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(record.with_current(0).unwrap().current_index(), 0);
    }

    #[test]
    fn status_codes_parse_from_backend_form() {
        assert_eq!(
            TrackingStatus::from_code("out_for_delivery"),
            Some(TrackingStatus::OutForDelivery)
        );
        assert_eq!(TrackingStatus::from_code("LOST"), None);
        assert_eq!(TrackingStatus::PickedUp.label(), "Picked Up");
    }
}
