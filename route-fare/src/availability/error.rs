//! Availability lookup error types.

use std::time::Duration;

/// Errors from an availability lookup.
///
/// None of these are fatal: the selection controller degrades every one of
/// them to an "unavailable" display and an unknown verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No availability known for this bus
    #[error("no availability for bus {bus_id}")]
    NotFound { bus_id: String },

    /// Lookup did not answer within the configured timeout
    #[error("availability lookup timed out after {0:?}")]
    TimedOut(Duration),

    /// Response body could not be decoded or was inconsistent
    #[error("malformed availability response: {message}")]
    Malformed { message: String },

    /// Fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },

    /// Source could not be reached
    #[error("availability source unavailable: {0}")]
    Unavailable(String),
}
