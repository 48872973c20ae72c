//! Thin asynchronous client for the SwiftTrack tracking API.
//!
//! - `GET {base}/tracking/{id}` returns a shipment, either bare or wrapped in
//!   the `{ status, data, message }` envelope the gateway uses.
//! - A 404 (status code or envelope) means the identifier is unknown.

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::domain::{
    LookupFailure, LookupOutcome, RecordError, ShipmentEvent, ShipmentLookup, ShipmentRecord,
    TrackingStatus,
};

const USER_AGENT: &str = concat!("swifttrack-tracker/", env!("CARGO_PKG_VERSION"));
const UNKNOWN_LOCATION: &str = "Unknown location";

#[derive(Debug, Error)]
pub enum TrackingClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed payload: {0}")]
    Payload(String),
    #[error("invalid shipment: {0}")]
    Record(#[from] RecordError),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Clone)]
pub struct TrackingClient {
    http: Client,
    base_url: Url,
}

impl TrackingClient {
    pub fn with_base_url(base: &str) -> Result<Self, TrackingClientError> {
        let mut base = base.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;
        if base_url.cannot_be_a_base() {
            return Err(TrackingClientError::Api(format!(
                "base URL {base_url} cannot hold paths"
            )));
        }
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches a shipment; `Ok(None)` when the service does not know the ID.
    pub async fn fetch_shipment(
        &self,
        tracking_id: &str,
    ) -> Result<Option<ShipmentRecord>, TrackingClientError> {
        if is_dot_segment(tracking_id) {
            debug!(tracking_id, "dot-only identifier cannot name a shipment");
            return Ok(None);
        }
        let url = self.url(tracking_id)?;
        debug!(%url, "requesting shipment");

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let raw: serde_json::Value = response.error_for_status()?.json().await?;
        parse_shipment(raw)
    }

    fn url(&self, tracking_id: &str) -> Result<Url, TrackingClientError> {
        // `.` and `..` are normalized away as path segments, even percent-encoded.
        if is_dot_segment(tracking_id) {
            return Err(TrackingClientError::Api(format!(
                "tracking ID {tracking_id:?} is not addressable"
            )));
        }
        let mut url = self.base_url.join("tracking/")?;
        url.path_segments_mut()
            .map_err(|_| TrackingClientError::Api("base URL cannot hold paths".into()))?
            .pop_if_empty()
            .push(tracking_id);
        Ok(url)
    }
}

fn is_dot_segment(tracking_id: &str) -> bool {
    matches!(tracking_id, "." | "..")
}

impl ShipmentLookup for TrackingClient {
    async fn lookup_shipment(&self, tracking_id: &str) -> LookupOutcome {
        match self.fetch_shipment(tracking_id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(LookupFailure::NotFound),
            Err(err) => {
                warn!(tracking_id, error = %err, "tracking API request failed");
                Err(LookupFailure::ServiceUnavailable)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    status: String,
    #[serde(default)]
    http_code: Option<u16>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShipmentDto {
    #[serde(alias = "tracking_id")]
    tracking_id: String,
    #[serde(alias = "expected_delivery")]
    expected_delivery: String,
    #[serde(default)]
    events: Vec<EventDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDto {
    #[serde(alias = "event_time", alias = "eventTime")]
    timestamp: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "status_label")]
    status_label: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    current: Option<bool>,
}

/// Accepts a bare shipment body or one wrapped in the gateway envelope.
fn parse_shipment(raw: serde_json::Value) -> Result<Option<ShipmentRecord>, TrackingClientError> {
    if raw.get("status").is_some_and(serde_json::Value::is_string) {
        let envelope: ApiEnvelope = serde_json::from_value(raw)
            .map_err(|err| TrackingClientError::Payload(err.to_string()))?;
        let ApiEnvelope {
            status,
            http_code,
            data,
            message,
        } = envelope;

        if !status.eq_ignore_ascii_case("ok") {
            if http_code == Some(404) || status.eq_ignore_ascii_case("not_found") {
                return Ok(None);
            }
            return Err(TrackingClientError::Api(message.unwrap_or(status)));
        }
        let data = data.ok_or_else(|| TrackingClientError::Api("response missing data".into()))?;
        return parse_shipment_body(data).map(Some);
    }

    parse_shipment_body(raw).map(Some)
}

fn parse_shipment_body(value: serde_json::Value) -> Result<ShipmentRecord, TrackingClientError> {
    let dto: ShipmentDto = serde_json::from_value(value)
        .map_err(|err| TrackingClientError::Payload(err.to_string()))?;
    ShipmentRecord::try_from(dto)
}

impl TryFrom<ShipmentDto> for ShipmentRecord {
    type Error = TrackingClientError;

    fn try_from(dto: ShipmentDto) -> Result<Self, Self::Error> {
        let expected_delivery = parse_timestamp(&dto.expected_delivery)?;
        let current = dto.events.iter().position(|event| event.current == Some(true));
        let events = dto
            .events
            .into_iter()
            .map(ShipmentEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let record = ShipmentRecord::new(dto.tracking_id, expected_delivery, events)?;
        match current {
            Some(index) => Ok(record.with_current(index)?),
            None => Ok(record),
        }
    }
}

impl TryFrom<EventDto> for ShipmentEvent {
    type Error = TrackingClientError;

    fn try_from(dto: EventDto) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&dto.timestamp)?;
        let status = dto.status.as_deref().and_then(TrackingStatus::from_code);
        let status_label = dto
            .status_label
            .filter(|label| !label.trim().is_empty())
            .or_else(|| status.map(|status| status.label().to_string()))
            .or(dto.status)
            .unwrap_or_else(|| "Status update".to_string());
        let location = dto
            .location
            .filter(|location| !location.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

        Ok(Self {
            timestamp,
            status_label,
            location,
            status,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, TrackingClientError> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339)
        .map_err(|err| TrackingClientError::Payload(format!("bad timestamp {raw:?}: {err}")))
}
