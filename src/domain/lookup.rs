//! Request lifecycle for shipment lookups.
//!
//! - [`LookupController`] owns the single [`LookupState`] cell and hands out a
//!   [`LookupTicket`] per accepted submission.
//! - Every ticket carries a monotonically increasing token; only the ticket
//!   issued by the most recent submission may move state out of `Searching`.
//! - [`perform_lookup`] runs one ticket against a [`ShipmentLookup`] service
//!   under a bounded wait.

use std::{future::Future, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::shipment::{ShipmentRecord, TrackingQuery};

/// Why a lookup did not produce a shipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LookupFailure {
    #[error("tracking ID not recognised")]
    NotFound,
    #[error("tracking service unavailable")]
    ServiceUnavailable,
}

pub type LookupOutcome = Result<ShipmentRecord, LookupFailure>;

/// Remote service resolving a tracking ID to a shipment record.
#[allow(async_fn_in_trait)]
pub trait ShipmentLookup {
    async fn lookup_shipment(&self, tracking_id: &str) -> LookupOutcome;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LookupState {
    #[default]
    Idle,
    Searching {
        query: TrackingQuery,
    },
    Found {
        query: TrackingQuery,
        shipment: ShipmentRecord,
    },
    Failed {
        query: TrackingQuery,
        reason: LookupFailure,
    },
}

impl LookupState {
    #[cfg(test)]
    pub fn query(&self) -> Option<&TrackingQuery> {
        match self {
            LookupState::Idle => None,
            LookupState::Searching { query }
            | LookupState::Found { query, .. }
            | LookupState::Failed { query, .. } => Some(query),
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, LookupState::Searching { .. })
    }

    #[cfg(test)]
    pub fn shipment(&self) -> Option<&ShipmentRecord> {
        match self {
            LookupState::Found { shipment, .. } => Some(shipment),
            _ => None,
        }
    }
}

/// Handle for one dispatched lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTicket {
    token: u64,
    query: TrackingQuery,
}

#[cfg(test)]
impl LookupTicket {
    pub fn query(&self) -> &TrackingQuery {
        &self.query
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The ticket was superseded or already resolved; state is unchanged.
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct LookupController {
    state: LookupState,
    issued: u64,
    active: Option<u64>,
}

impl LookupController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Accepts a raw tracking ID from the input field.
    ///
    /// Blank input is ignored. Resubmitting the identifier that is already in
    /// flight keeps the outstanding lookup and returns `None`; any other input
    /// supersedes whatever came before.
    pub fn submit(&mut self, raw_input: &str) -> Option<LookupTicket> {
        let Some(query) = TrackingQuery::parse(raw_input) else {
            debug!("blank tracking ID; nothing to search");
            return None;
        };

        if let LookupState::Searching { query: pending } = &self.state {
            if *pending == query {
                debug!(%query, "lookup already in flight; ignoring duplicate submit");
                return None;
            }
        }

        self.issued += 1;
        let token = self.issued;
        if let Some(previous) = self.active.replace(token) {
            debug!(previous, token, "superseding outstanding lookup");
        }
        info!(%query, token, "dispatching shipment lookup");
        self.state = LookupState::Searching {
            query: query.clone(),
        };
        Some(LookupTicket { token, query })
    }

    /// Applies the outcome of a lookup if its ticket is still the active one.
    pub fn resolve(&mut self, ticket: &LookupTicket, outcome: LookupOutcome) -> Resolution {
        if self.active != Some(ticket.token) || !self.state.is_searching() {
            debug!(
                query = %ticket.query,
                token = ticket.token,
                "discarding stale lookup response"
            );
            return Resolution::Stale;
        }

        self.active = None;
        let query = ticket.query.clone();
        self.state = match outcome {
            Ok(shipment) => {
                info!(
                    %query,
                    events = shipment.events().len(),
                    "shipment lookup resolved"
                );
                LookupState::Found { query, shipment }
            }
            Err(reason) => {
                info!(%query, %reason, "shipment lookup failed");
                LookupState::Failed { query, reason }
            }
        };
        Resolution::Applied
    }
}

/// Runs a ticket against `service`, mapping an elapsed `timeout` to
/// [`LookupFailure::ServiceUnavailable`].
pub async fn perform_lookup<S>(service: &S, ticket: &LookupTicket, timeout: Duration) -> LookupOutcome
where
    S: ShipmentLookup,
{
    bounded(service.lookup_shipment(ticket.query.as_str()), ticket, timeout).await
}

async fn bounded<F>(lookup: F, ticket: &LookupTicket, timeout: Duration) -> LookupOutcome
where
    F: Future<Output = LookupOutcome>,
{
    match tokio::time::timeout(timeout, lookup).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(
                query = %ticket.query,
                timeout_secs = timeout.as_secs_f32(),
                "shipment lookup timed out"
            );
            Err(LookupFailure::ServiceUnavailable)
        }
    }
}
