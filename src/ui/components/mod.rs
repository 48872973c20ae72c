pub mod lookup_status;
pub mod shipment_timeline;
pub mod toast;
pub mod tracking_form;

pub use lookup_status::LookupStatus;
pub use shipment_timeline::ShipmentTimeline;
pub use tracking_form::TrackingForm;
