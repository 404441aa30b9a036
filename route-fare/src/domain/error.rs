//! Domain error types.
//!
//! `InvalidRouteError` is fatal at construction: there is no `RouteIndex`
//! without a well-formed route. `InvalidSegmentError` is recoverable and
//! callers treat it as a zero fare.

use super::{InvalidFare, StopId};

/// Malformed route data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRouteError {
    /// Route has no stops
    #[error("route must have at least one stop")]
    Empty,

    /// Two stops carry the same sequence number
    #[error("stops {first} and {second} share sequence {sequence}")]
    DuplicateSequence {
        sequence: u32,
        first: StopId,
        second: StopId,
    },

    /// Sequence order disagrees with input order
    #[error("stop {stop} has sequence {sequence}, expected greater than {previous}")]
    OutOfOrder {
        stop: StopId,
        sequence: u32,
        previous: u32,
    },

    /// Two stops carry the same id
    #[error("stop id {0} appears more than once")]
    DuplicateStopId(StopId),

    /// Some stops have explicit sequence numbers and some don't
    #[error("sequence numbers must be given for every stop or for none")]
    MixedSequencing,

    /// A leg fare is negative or not a number
    #[error("stop {stop}: {source}")]
    InvalidFare {
        stop: StopId,
        #[source]
        source: InvalidFare,
    },

    /// Leg fares are individually valid but their total is not a finite number
    #[error("total leg fare up to stop {stop} is too large")]
    FareOverflow { stop: StopId },
}

/// An origin/destination pair that does not form a travellable segment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSegmentError {
    #[error("no origin selected")]
    MissingOrigin,

    #[error("no destination selected")]
    MissingDestination,

    #[error("unknown stop {0}")]
    UnknownStop(StopId),

    #[error("destination {destination} is not downstream of origin {origin}")]
    NotDownstream { origin: StopId, destination: StopId },
}
