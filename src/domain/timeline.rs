use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime};

use super::shipment::{ShipmentRecord, TrackingStatus};

const CLOCK: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period]");
const DAY: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short], [month repr:short] [day padding:none]");

/// One rendered checkpoint of the delivery timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayRow {
    pub status_label: String,
    pub location: String,
    pub time_label: String,
    pub is_current: bool,
    pub status: Option<TrackingStatus>,
}

/// Projects a shipment into display rows, preserving event order.
///
/// Labels are computed in the UTC offset of `now`. Exactly one row is marked
/// current: the record's explicit marker if it carries one, otherwise the
/// newest event.
///
/// # Panics
///
/// Panics if the record has no events. [`ShipmentRecord::new`] rejects such
/// records, so reaching this means an upstream contract was broken.
pub fn render(shipment: &ShipmentRecord, now: OffsetDateTime) -> Vec<DisplayRow> {
    let events = shipment.events();
    assert!(
        !events.is_empty(),
        "shipment {} has no events to render",
        shipment.tracking_id()
    );

    let current = shipment.current_index();
    events
        .iter()
        .enumerate()
        .map(|(idx, event)| DisplayRow {
            status_label: event.status_label.clone(),
            location: event.location.clone(),
            time_label: event_time_label(event.timestamp, now),
            is_current: idx == current,
            status: event.status,
        })
        .collect()
}

/// Rows for display with the newest checkpoint on top.
pub fn newest_first(mut rows: Vec<DisplayRow>) -> Vec<DisplayRow> {
    rows.reverse();
    rows
}

/// "1:45 PM" for today, "Yesterday, 8:00 PM" for the previous day, dated otherwise.
pub fn event_time_label(timestamp: OffsetDateTime, now: OffsetDateTime) -> String {
    let local = timestamp.to_offset(now.offset());
    let clock = format_with(local, CLOCK);
    match day_offset(local, now) {
        0 => clock,
        -1 => format!("Yesterday, {clock}"),
        1 => format!("Tomorrow, {clock}"),
        _ => format!("{}, {clock}", format_with(local, DAY)),
    }
}

pub fn expected_delivery_label(shipment: &ShipmentRecord, now: OffsetDateTime) -> String {
    let local = shipment.expected_delivery().to_offset(now.offset());
    let clock = format_with(local, CLOCK);
    match day_offset(local, now) {
        0 => format!("Today, {clock}"),
        1 => format!("Tomorrow, {clock}"),
        -1 => format!("Yesterday, {clock}"),
        _ => format!("{}, {clock}", format_with(local, DAY)),
    }
}

/// Whole calendar days from `now` to `local`, both in `now`'s offset.
fn day_offset(local: OffsetDateTime, now: OffsetDateTime) -> i64 {
    (local.date() - now.date()).whole_days()
}

fn format_with(value: OffsetDateTime, format: &[BorrowedFormatItem<'_>]) -> String {
    value
        .format(format)
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use time::macros::{datetime, offset};

    use crate::domain::shipment::{ShipmentEvent, ShipmentRecord};

    const NOW: OffsetDateTime = datetime!(2026-10-18 15:00 +05:30);

    fn sample() -> ShipmentRecord {
        ShipmentRecord::new(
            "SW-82930192",
            datetime!(2026-10-18 14:30 +05:30),
            vec![
                ShipmentEvent::new(datetime!(2026-10-17 16:00 +05:30), "Picked Up", "Seller Warehouse"),
                ShipmentEvent::new(datetime!(2026-10-17 20:00 +05:30), "In Transit", "Mumbai Gateway"),
                ShipmentEvent::new(
                    datetime!(2026-10-18 10:30 +05:30),
                    "Arrived at Sort Facility",
                    "Bangalore Hub",
                ),
                ShipmentEvent::new(datetime!(2026-10-18 13:45 +05:30), "Out for Delivery", "Bangalore Hub")
                    .with_status(TrackingStatus::OutForDelivery),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rows_follow_event_order_with_last_current() {
        let rows = render(&sample(), NOW);
        let labels: Vec<_> = rows.iter().map(|row| row.status_label.as_str()).collect();
        assert_eq!(
            labels,
            ["Picked Up", "In Transit", "Arrived at Sort Facility", "Out for Delivery"]
        );
        let current: Vec<_> = rows.iter().map(|row| row.is_current).collect();
        assert_eq!(current, [false, false, false, true]);
        assert_eq!(rows[3].status, Some(TrackingStatus::OutForDelivery));
    }

    #[test]
    fn explicit_marker_wins_over_position() {
        let record = sample().with_current(2).unwrap();
        let rows = render(&record, NOW);
        assert!(rows[2].is_current);
        assert_eq!(rows.iter().filter(|row| row.is_current).count(), 1);
    }

    #[test]
    fn labels_use_clock_for_today_and_yesterday_marker_before() {
        let rows = render(&sample(), NOW);
        assert_eq!(rows[0].time_label, "Yesterday, 4:00 PM");
        assert_eq!(rows[1].time_label, "Yesterday, 8:00 PM");
        assert_eq!(rows[2].time_label, "10:30 AM");
        assert_eq!(rows[3].time_label, "1:45 PM");
    }

    #[test]
    fn labels_are_computed_in_viewer_offset() {
        // 20:00 UTC on the 17th is already the 18th in India.
        let label = event_time_label(datetime!(2026-10-17 20:00 UTC), NOW);
        assert_eq!(label, "1:30 AM");

        let older = event_time_label(datetime!(2026-10-13 08:00 UTC).to_offset(offset!(+05:30)), NOW);
        assert_eq!(older, "Tue, Oct 13, 1:30 PM");
    }

    #[test]
    fn expected_delivery_reads_relative_day() {
        assert_eq!(expected_delivery_label(&sample(), NOW), "Today, 2:30 PM");

        let tomorrow = ShipmentRecord::new(
            "SW-2",
            datetime!(2026-10-19 09:00 +05:30),
            vec![ShipmentEvent::new(NOW, "Picked Up", "Seller Warehouse")],
        )
        .unwrap();
        assert_eq!(expected_delivery_label(&tomorrow, NOW), "Tomorrow, 9:00 AM");
    }

    #[test]
    fn newest_first_reverses_without_touching_current() {
        let rows = newest_first(render(&sample(), NOW));
        assert_eq!(rows[0].status_label, "Out for Delivery");
        assert!(rows[0].is_current);
    }

    #[test]
    #[should_panic(expected = "has no events to render")]
    fn empty_record_fails_loudly() {
        let empty = ShipmentRecord::unchecked("SW-EMPTY", NOW, Vec::new());
        render(&empty, NOW);
    }
}
