//! Shipment tracking logic lives here; nothing in this module touches the UI.

pub mod lookup;
pub mod shipment;
pub mod timeline;

pub use lookup::{
    perform_lookup, LookupController, LookupFailure, LookupOutcome, LookupState, Resolution,
    ShipmentLookup,
};
pub use shipment::{RecordError, ShipmentEvent, ShipmentRecord, TrackingStatus};
pub use timeline::{expected_delivery_label, newest_first, render, DisplayRow};
