pub mod track;

pub use track::TrackPage;
