//! The availability lookup seam.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::domain::StopId;

use super::error::LookupError;
use super::types::AvailabilitySnapshot;

/// What an availability lookup is asked about.
///
/// The seat endpoint only keys on the bus; the segment travels along so
/// lookups that price availability per segment can use it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AvailabilityQuery {
    pub bus_id: String,
    pub origin: StopId,
    pub destination: StopId,
}

impl AvailabilityQuery {
    pub fn new(bus_id: impl Into<String>, origin: StopId, destination: StopId) -> Self {
        Self {
            bus_id: bus_id.into(),
            origin,
            destination,
        }
    }
}

/// Trait for fetching live seat availability.
///
/// This is the only I/O the selection controller performs. The transport
/// behind it is up to the implementor.
pub trait AvailabilityLookup {
    /// Fetch the current availability for the queried bus.
    fn check(
        &self,
        query: &AvailabilityQuery,
    ) -> impl Future<Output = Result<AvailabilitySnapshot, LookupError>>;
}

/// Run a lookup, turning an elapsed `timeout` into [`LookupError::TimedOut`].
pub async fn check_with_timeout<L: AvailabilityLookup>(
    lookup: &L,
    query: &AvailabilityQuery,
    timeout: Duration,
) -> Result<AvailabilitySnapshot, LookupError> {
    match tokio::time::timeout(timeout, lookup.check(query)).await {
        Ok(result) => result,
        Err(_) => {
            debug!(bus_id = %query.bus_id, ?timeout, "availability lookup timed out");
            Err(LookupError::TimedOut(timeout))
        }
    }
}

/// Lookup that always returns the same answer.
///
/// Counts the lookups it serves, which is handy for asserting when the
/// controller does and doesn't go to the network.
#[derive(Debug)]
pub struct StaticAvailability {
    response: Result<AvailabilitySnapshot, LookupError>,
    queries: Mutex<Vec<AvailabilityQuery>>,
}

impl StaticAvailability {
    /// Always answer with `snapshot`.
    pub fn available(snapshot: AvailabilitySnapshot) -> Self {
        Self {
            response: Ok(snapshot),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: LookupError) -> Self {
        Self {
            response: Err(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.queries.lock().map(|q| q.len()).unwrap_or_default()
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<AvailabilityQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

impl AvailabilityLookup for StaticAvailability {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilitySnapshot, LookupError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
        self.response.clone()
    }
}
