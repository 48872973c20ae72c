//! Class helpers for the tracking page; styles live in `assets/main.css`.

use crate::domain::{DisplayRow, LookupFailure, TrackingStatus};

pub fn row_class(row: &DisplayRow) -> &'static str {
    if row.is_current {
        "timeline-row timeline-row--current"
    } else {
        "timeline-row"
    }
}

/// Marker dot on the timeline rail, tinted by status for the current row only.
pub fn dot_class(row: &DisplayRow) -> &'static str {
    if !row.is_current {
        return "timeline-dot";
    }
    match row.status {
        Some(TrackingStatus::Delivered) => "timeline-dot timeline-dot--delivered",
        Some(TrackingStatus::Failed) => "timeline-dot timeline-dot--failed",
        _ => "timeline-dot timeline-dot--active",
    }
}

pub fn failure_class(reason: LookupFailure) -> &'static str {
    match reason {
        LookupFailure::NotFound => "lookup-error lookup-error--not-found",
        LookupFailure::ServiceUnavailable => "lookup-error lookup-error--unavailable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_current: bool, status: Option<TrackingStatus>) -> DisplayRow {
        DisplayRow {
            status_label: "Delivered".to_string(),
            location: "Bangalore Hub".to_string(),
            time_label: "2:30 PM".to_string(),
            is_current,
            status,
        }
    }

    #[test]
    fn only_current_row_is_tinted() {
        assert_eq!(
            dot_class(&row(true, Some(TrackingStatus::Delivered))),
            "timeline-dot timeline-dot--delivered"
        );
        assert_eq!(dot_class(&row(false, Some(TrackingStatus::Delivered))), "timeline-dot");
        assert_eq!(dot_class(&row(true, None)), "timeline-dot timeline-dot--active");
        assert_eq!(row_class(&row(false, None)), "timeline-row");
    }
}
