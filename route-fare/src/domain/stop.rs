//! Stop types.
//!
//! A `Stop` is one point on a bus route. Its `leg_fare` is attached to the
//! arrival end of a leg: it is the fare for travelling into this stop from
//! the stop immediately before it.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use super::Fare;

/// Stable identifier of a stop, used as the dropdown option value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    /// Create a stop id.
    pub fn new(id: impl Into<String>) -> Self {
        StopId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StopId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StopId {
    fn from(value: &str) -> Self {
        StopId(value.to_string())
    }
}

impl From<String> for StopId {
    fn from(value: String) -> Self {
        StopId(value)
    }
}

/// A stop on a bus route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    /// Stable identifier
    pub id: StopId,

    /// Display name
    pub label: String,

    /// Position along the route; strictly increasing in physical order
    pub sequence: u32,

    /// Fare from the preceding stop to this one (unused on the first stop)
    pub leg_fare: Fare,
}

impl Stop {
    /// Create a stop.
    pub fn new(
        id: impl Into<StopId>,
        label: impl Into<String>,
        sequence: u32,
        leg_fare: Fare,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sequence,
            leg_fare,
        }
    }
}
