//! Route index.
//!
//! A `RouteIndex` is the authoritative, immutable view of one bus route's
//! stops. Stops are held in ascending `sequence` order, which construction
//! guarantees is also input order, so a stop's index and its sequence rank
//! are interchangeable. Route data without explicit sequence numbers is the
//! degenerate case `sequence == index` (see [`RouteIndex::by_index`]).

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::{Fare, InvalidRouteError, InvalidSegmentError, Stop, StopId};

/// Ordered, queryable stops of one route.
///
/// # Invariants
///
/// - At least one stop
/// - `sequence` strictly increasing with index
/// - Stop ids are unique
#[derive(Debug, Clone)]
pub struct RouteIndex {
    stops: Vec<Stop>,
    positions: HashMap<StopId, usize>,
}

impl RouteIndex {
    /// Build an index from stops in physical order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `stops` is empty
    /// - two stops share a sequence number or an id
    /// - sequence order does not match input order
    /// - the leg fares add up to more than a `Fare` can hold
    ///
    /// # Examples
    ///
    /// ```
    /// use route_fare::domain::{Fare, RouteIndex, Stop};
    ///
    /// let fare = |f| Fare::new(f).unwrap();
    /// let route = RouteIndex::build(vec![
    ///     Stop::new("s1", "Central", 1, Fare::ZERO),
    ///     Stop::new("s2", "Market", 2, fare(10.0)),
    ///     Stop::new("s3", "Harbour", 3, fare(15.0)),
    /// ])
    /// .unwrap();
    ///
    /// let downstream: Vec<_> = route
    ///     .downstream_of(Some("s1"))
    ///     .iter()
    ///     .map(|s| s.id.as_str())
    ///     .collect();
    /// assert_eq!(downstream, ["s2", "s3"]);
    ///
    /// assert_eq!(route.fare_between(Some("s1"), Some("s3")), Ok(fare(25.0)));
    /// assert!(route.fare_between(Some("s3"), Some("s2")).is_err());
    /// ```
    pub fn build(stops: Vec<Stop>) -> Result<Self, InvalidRouteError> {
        if stops.is_empty() {
            return Err(InvalidRouteError::Empty);
        }

        // Duplicates are reported before ordering so [1, 2, 1] names the clash
        let mut by_sequence: HashMap<u32, &StopId> = HashMap::with_capacity(stops.len());
        for stop in &stops {
            if let Some(first) = by_sequence.insert(stop.sequence, &stop.id) {
                return Err(InvalidRouteError::DuplicateSequence {
                    sequence: stop.sequence,
                    first: first.clone(),
                    second: stop.id.clone(),
                });
            }
        }

        for pair in stops.windows(2) {
            if pair[1].sequence <= pair[0].sequence {
                return Err(InvalidRouteError::OutOfOrder {
                    stop: pair[1].id.clone(),
                    sequence: pair[1].sequence,
                    previous: pair[0].sequence,
                });
            }
        }

        let mut positions = HashMap::with_capacity(stops.len());
        for (idx, stop) in stops.iter().enumerate() {
            match positions.entry(stop.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(InvalidRouteError::DuplicateStopId(stop.id.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
        }

        // Every segment fare is a partial sum of this running total
        let mut total = Fare::ZERO;
        for stop in &stops[1..] {
            total = total + stop.leg_fare;
            if !total.amount().is_finite() {
                return Err(InvalidRouteError::FareOverflow {
                    stop: stop.id.clone(),
                });
            }
        }

        Ok(Self { stops, positions })
    }

    /// Build an index from stops without sequence numbers, numbering them by
    /// position (first stop is sequence 0).
    pub fn by_index<I, S>(stops: I) -> Result<Self, InvalidRouteError>
    where
        I: IntoIterator<Item = (S, String, Fare)>,
        S: Into<StopId>,
    {
        let numbered = stops
            .into_iter()
            .zip(0u32..)
            .map(|((id, label, leg_fare), sequence)| Stop::new(id, label, sequence, leg_fare))
            .collect();
        Self::build(numbered)
    }

    /// All stops in route order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: construction rejects empty routes.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// First stop on the route.
    pub fn first(&self) -> &Stop {
        // Safe: non-empty by construction
        &self.stops[0]
    }

    /// Last stop on the route.
    pub fn last(&self) -> &Stop {
        // Safe: non-empty by construction
        &self.stops[self.stops.len() - 1]
    }

    /// Returns true if the route has a stop with this id.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Look up a stop by id.
    pub fn get(&self, id: &str) -> Option<&Stop> {
        self.position(id).map(|idx| &self.stops[idx])
    }

    /// Index of a stop in route order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Look up a stop by index.
    pub fn at_index(&self, idx: usize) -> Option<&Stop> {
        self.stops.get(idx)
    }

    /// Look up a stop by sequence number.
    pub fn at_sequence(&self, sequence: u32) -> Option<&Stop> {
        self.stops
            .binary_search_by_key(&sequence, |s| s.sequence)
            .ok()
            .map(|idx| &self.stops[idx])
    }

    /// Stops strictly after `origin`, in ascending sequence order.
    ///
    /// With no origin, or an origin not on this route, every stop is
    /// returned: no restriction can be computed without a chosen origin.
    pub fn downstream_of(&self, origin: Option<&str>) -> &[Stop] {
        match origin.and_then(|id| self.position(id)) {
            Some(idx) => &self.stops[idx + 1..],
            None => &self.stops,
        }
    }

    /// Sum of leg fares from `origin` (exclusive) to `destination` (inclusive).
    ///
    /// Leg fares belong to the arrival stop, so the origin's own leg fare is
    /// never charged and the destination's always is.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either id is absent or unknown, or if the destination
    /// is not strictly downstream of the origin.
    pub fn fare_between(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> Result<Fare, InvalidSegmentError> {
        let (from, to) = self.segment(origin, destination)?;
        Ok(self.stops[from + 1..=to].iter().map(|s| s.leg_fare).sum())
    }

    /// Resolve an origin/destination pair to stop indices.
    ///
    /// Succeeds only when the destination is strictly downstream of the origin.
    pub fn segment(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> Result<(usize, usize), InvalidSegmentError> {
        let origin = origin.ok_or(InvalidSegmentError::MissingOrigin)?;
        let destination = destination.ok_or(InvalidSegmentError::MissingDestination)?;

        let from = self
            .position(origin)
            .ok_or_else(|| InvalidSegmentError::UnknownStop(StopId::from(origin)))?;
        let to = self
            .position(destination)
            .ok_or_else(|| InvalidSegmentError::UnknownStop(StopId::from(destination)))?;

        if to <= from {
            return Err(InvalidSegmentError::NotDownstream {
                origin: StopId::from(origin),
                destination: StopId::from(destination),
            });
        }

        Ok((from, to))
    }
}
