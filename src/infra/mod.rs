//! External services the tracker talks to.

pub mod demo;
pub mod tracking;

use tracing::{info, warn};

use crate::domain::{LookupFailure, LookupOutcome, ShipmentLookup};
use crate::util::config::TrackerConfig;

pub use demo::DemoLookup;
pub use tracking::{TrackingClient, TrackingClientError};

/// Lookup service selected from configuration at startup.
#[derive(Clone)]
pub enum LookupBackend {
    Remote(TrackingClient),
    Demo(DemoLookup),
    /// Configured endpoint was unusable; every lookup reports an outage.
    Offline,
}

impl LookupBackend {
    pub fn from_config(config: &TrackerConfig) -> Result<Self, TrackingClientError> {
        match config.api_base_url.as_deref() {
            Some(base) => {
                let client = TrackingClient::with_base_url(base)?;
                info!(base_url = %client.base_url(), "using remote tracking API");
                Ok(Self::Remote(client))
            }
            None => {
                info!("no tracking API configured; serving demo shipments");
                Ok(Self::Demo(DemoLookup::default()))
            }
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo(_))
    }
}

impl ShipmentLookup for LookupBackend {
    async fn lookup_shipment(&self, tracking_id: &str) -> LookupOutcome {
        match self {
            Self::Remote(client) => client.lookup_shipment(tracking_id).await,
            Self::Demo(demo) => demo.lookup_shipment(tracking_id).await,
            Self::Offline => {
                warn!(tracking_id, "lookup attempted without a usable tracking API");
                Err(LookupFailure::ServiceUnavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_follows_configured_endpoint() {
        let demo = LookupBackend::from_config(&TrackerConfig::default()).unwrap();
        assert!(demo.is_demo());

        let config = TrackerConfig {
            api_base_url: Some("https://api.swifttrack.example".to_string()),
            ..TrackerConfig::default()
        };
        assert!(matches!(
            LookupBackend::from_config(&config),
            Ok(LookupBackend::Remote(_))
        ));

        let broken = TrackerConfig {
            api_base_url: Some("not a url".to_string()),
            ..TrackerConfig::default()
        };
        assert!(LookupBackend::from_config(&broken).is_err());
    }

    #[tokio::test]
    async fn offline_backend_reports_outage() {
        assert_eq!(
            LookupBackend::Offline.lookup_shipment("SW-1").await,
            Err(LookupFailure::ServiceUnavailable)
        );
    }
}
