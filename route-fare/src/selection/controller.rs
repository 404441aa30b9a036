//! Reactive fare and availability recomputation for a booking form.
//!
//! Every origin, destination or seat-count change synchronously recomputes
//! the destination filter and the fare. When the selection is complete the
//! change also yields a [`LookupTicket`]; the caller resolves it against an
//! [`AvailabilityLookup`] and hands the outcome back with
//! [`SelectionController::settle`].
//!
//! Each change bumps a generation counter and tickets carry the generation
//! they were issued at, so only the newest ticket's outcome is applied. A
//! slow answer for an old selection can never overwrite a fresher one.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::availability::{
    AvailabilityLookup, AvailabilityQuery, AvailabilitySnapshot, LookupError, check_with_timeout,
};
use crate::domain::{Fare, RouteIndex, Stop, StopId};

use super::config::SelectionConfig;
use super::verdict::{AvailabilityDisplay, Verdict};

/// The caller's current form selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub origin: Option<StopId>,
    pub destination: Option<StopId>,
    /// 0 means "not yet entered"
    pub seat_count: u32,
}

/// Where the controller is in the selection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// No origin chosen
    Idle,
    /// Origin chosen; destinations filtered but no valid destination yet
    OriginChosen,
    /// Valid segment chosen; fare known, no lookup in flight
    RouteChosen,
    /// Lookup issued for the current selection
    AwaitingAvailability,
    /// Fare and availability both known
    Settled,
    /// Lookup failed; fare still valid
    AvailabilityFailed,
}

/// A pending availability lookup for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    seat_count: u32,
    query: AvailabilityQuery,
}

impl LookupTicket {
    /// What will be looked up.
    pub fn query(&self) -> &AvailabilityQuery {
        &self.query
    }

    /// Seat count the verdict will be computed for.
    pub fn seat_count(&self) -> u32 {
        self.seat_count
    }

    /// Run the lookup. Does not touch the controller, so several tickets
    /// may be in flight at once.
    pub async fn resolve<L: AvailabilityLookup>(
        self,
        lookup: &L,
        timeout: Duration,
    ) -> LookupOutcome {
        let result = check_with_timeout(lookup, &self.query, timeout).await;
        LookupOutcome {
            ticket: self,
            result,
        }
    }
}

/// A resolved ticket, ready to be applied with [`SelectionController::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    ticket: LookupTicket,
    result: Result<AvailabilitySnapshot, LookupError>,
}

impl LookupOutcome {
    pub fn ticket(&self) -> &LookupTicket {
        &self.ticket
    }

    pub fn result(&self) -> &Result<AvailabilitySnapshot, LookupError> {
        &self.result
    }
}

/// A destination dropdown option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationOption {
    pub id: StopId,
    pub label: String,
}

impl From<&Stop> for DestinationOption {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.clone(),
            label: stop.label.clone(),
        }
    }
}

/// Everything the form renders after a recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionView {
    pub state: SelectionState,
    pub destinations: Vec<DestinationOption>,
    pub fare: Fare,
    pub fare_text: String,
    pub availability: String,
    pub verdict: Verdict,
    pub message: Option<String>,
}

/// Drives fare and availability for one bus route's booking form.
#[derive(Debug, Clone)]
pub struct SelectionController {
    route: Arc<RouteIndex>,
    bus_id: Option<String>,
    config: SelectionConfig,
    selection: Selection,
    state: SelectionState,
    fare: Fare,
    availability: AvailabilityDisplay,
    verdict: Verdict,
    generation: u64,
}

impl SelectionController {
    /// Create a controller with an empty selection.
    ///
    /// Without a `bus_id` no availability lookups are ever issued.
    pub fn new(route: Arc<RouteIndex>, bus_id: Option<String>, config: SelectionConfig) -> Self {
        Self {
            route,
            bus_id,
            config,
            selection: Selection::default(),
            state: SelectionState::Idle,
            fare: Fare::ZERO,
            availability: AvailabilityDisplay::Blank,
            verdict: Verdict::Unchecked,
            generation: 0,
        }
    }

    pub fn route(&self) -> &RouteIndex {
        &self.route
    }

    pub fn bus_id(&self) -> Option<&str> {
        self.bus_id.as_deref()
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Fare for the current selection.
    pub fn fare(&self) -> Fare {
        self.fare
    }

    /// Fare rounded to the configured currency precision.
    pub fn fare_text(&self) -> String {
        self.fare.format(self.config.currency_decimals)
    }

    pub fn availability(&self) -> &AvailabilityDisplay {
        &self.availability
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Valid destinations for the current origin, in route order.
    pub fn destinations(&self) -> &[Stop] {
        self.route.downstream_of(self.origin_id())
    }

    /// Destination dropdown options for the current origin.
    pub fn destination_options(&self) -> Vec<DestinationOption> {
        self.destinations().iter().map(DestinationOption::from).collect()
    }

    /// Snapshot of everything the form shows.
    pub fn view(&self) -> SelectionView {
        SelectionView {
            state: self.state,
            destinations: self.destination_options(),
            fare: self.fare,
            fare_text: self.fare_text(),
            availability: self.availability.to_string(),
            verdict: self.verdict,
            message: self.verdict.message(),
        }
    }

    /// Handle a new origin.
    ///
    /// The destination is always cleared, even if it would still be
    /// downstream of the new origin, so the fare drops to zero and no lookup
    /// is issued.
    pub fn on_origin_change(&mut self, origin: Option<StopId>) {
        let origin = self.known(origin);
        debug!(origin = ?origin, "origin changed");

        self.selection.origin = origin;
        self.selection.destination = None;
        let ticket = self.recompute(true);
        debug_assert!(ticket.is_none());
    }

    /// Handle a new destination.
    pub fn on_destination_change(&mut self, destination: Option<StopId>) -> Option<LookupTicket> {
        let destination = self.known(destination);
        debug!(destination = ?destination, "destination changed");

        self.selection.destination = destination;
        self.recompute(true)
    }

    /// Handle a new seat count. 0 means the field is blank.
    pub fn on_seat_count_change(&mut self, seat_count: u32) -> Option<LookupTicket> {
        debug!(seat_count, "seat count changed");

        self.selection.seat_count = seat_count;
        // Same origin/destination pair, so the last answer is not stale yet
        self.recompute(false)
    }

    /// Fare for `seat_count` seats from `origin` to `destination`.
    ///
    /// Zero when any input is missing, the destination isn't downstream, or
    /// the total is too large to represent.
    pub fn compute_fare(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
        seat_count: u32,
    ) -> Fare {
        if seat_count == 0 {
            return Fare::ZERO;
        }

        match self.route.fare_between(origin, destination) {
            Ok(per_seat) => per_seat.times(seat_count).unwrap_or_else(|| {
                trace!(%per_seat, seat_count, "fare overflows for seat count");
                Fare::ZERO
            }),
            Err(e) => {
                trace!(error = %e, "no fare for segment");
                Fare::ZERO
            }
        }
    }

    /// Check whether `seat_count` seats are free on this bus for the segment.
    ///
    /// A failed or timed-out lookup gives [`Verdict::Unknown`]. A blank seat
    /// count or a seat count over the limit never reaches the lookup.
    pub async fn check_availability<L: AvailabilityLookup>(
        &self,
        origin: &StopId,
        destination: &StopId,
        seat_count: u32,
        lookup: &L,
    ) -> Verdict {
        if seat_count == 0 {
            return Verdict::Unchecked;
        }
        if seat_count > self.config.max_seats {
            return Verdict::OverLimit {
                max: self.config.max_seats,
            };
        }
        let Some(bus_id) = self.bus_id.as_deref() else {
            return Verdict::Unknown;
        };

        let query = AvailabilityQuery::new(bus_id, origin.clone(), destination.clone());
        let result = check_with_timeout(lookup, &query, self.config.lookup_timeout).await;
        Verdict::from_lookup(seat_count, &result)
    }

    /// Apply a resolved lookup.
    ///
    /// Returns false, leaving everything untouched, if the selection has
    /// changed since the ticket was issued.
    pub fn settle(&mut self, outcome: LookupOutcome) -> bool {
        let LookupOutcome { ticket, result } = outcome;

        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale availability"
            );
            return false;
        }

        if let Err(e) = &result {
            debug!(error = %e, bus_id = %ticket.query.bus_id, "availability lookup failed");
        }

        self.availability = AvailabilityDisplay::from_lookup(&result);
        self.verdict = Verdict::from_lookup(ticket.seat_count, &result);
        trace!(generation = ticket.generation, verdict = ?self.verdict, "applied availability");
        self.state = if result.is_ok() {
            SelectionState::Settled
        } else {
            SelectionState::AvailabilityFailed
        };
        true
    }

    /// Resolve `ticket` and apply it.
    pub async fn refresh<L: AvailabilityLookup>(
        &mut self,
        ticket: LookupTicket,
        lookup: &L,
    ) -> bool {
        let outcome = ticket.resolve(lookup, self.config.lookup_timeout).await;
        self.settle(outcome)
    }

    fn origin_id(&self) -> Option<&str> {
        self.selection.origin.as_ref().map(StopId::as_str)
    }

    fn destination_id(&self) -> Option<&str> {
        self.selection.destination.as_ref().map(StopId::as_str)
    }

    /// Drop ids that aren't on this route.
    fn known(&self, id: Option<StopId>) -> Option<StopId> {
        match id {
            Some(id) if self.route.contains(id.as_str()) => Some(id),
            Some(id) => {
                debug!(stop = %id, "ignoring unknown stop");
                None
            }
            None => None,
        }
    }

    /// Recompute fare, verdict and state from the current selection.
    ///
    /// Invalidates every outstanding ticket and returns a new one when the
    /// selection is complete.
    fn recompute(&mut self, pair_changed: bool) -> Option<LookupTicket> {
        self.generation += 1;

        let seat_count = self.selection.seat_count;
        self.fare = self.compute_fare(self.origin_id(), self.destination_id(), seat_count);
        trace!(fare = %self.fare, generation = self.generation, "recomputed fare");

        if pair_changed {
            self.availability = AvailabilityDisplay::Blank;
        }

        self.verdict = if seat_count > self.config.max_seats {
            Verdict::OverLimit {
                max: self.config.max_seats,
            }
        } else {
            Verdict::Unchecked
        };

        let segment_valid = self
            .route
            .segment(self.origin_id(), self.destination_id())
            .is_ok();

        let ticket = if segment_valid && seat_count > 0 && seat_count <= self.config.max_seats {
            self.ticket()
        } else {
            None
        };

        self.state = match (&self.selection.origin, segment_valid, &ticket) {
            (None, _, _) => SelectionState::Idle,
            (Some(_), false, _) => SelectionState::OriginChosen,
            (Some(_), true, Some(_)) => SelectionState::AwaitingAvailability,
            (Some(_), true, None) => SelectionState::RouteChosen,
        };

        ticket
    }

    fn ticket(&self) -> Option<LookupTicket> {
        let bus_id = self.bus_id.as_deref()?;
        let origin = self.selection.origin.clone()?;
        let destination = self.selection.destination.clone()?;

        debug!(generation = self.generation, %bus_id, "issuing availability lookup");
        Some(LookupTicket {
            generation: self.generation,
            seat_count: self.selection.seat_count,
            query: AvailabilityQuery::new(bus_id, origin, destination),
        })
    }
}
