//! Seat availability types.
//!
//! `SeatsResponse` mirrors the seat endpoint's JSON body; it is converted to
//! an `AvailabilitySnapshot`, which guarantees `available <= total`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LookupError;

/// Raw seat availability body, e.g. `{"available_seats": 3, "total_seats": 40}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeatsResponse {
    pub available_seats: u32,
    pub total_seats: u32,
}

/// Error returned when available seats exceed total seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("available seats {available} exceed total seats {total}")]
pub struct InvalidSnapshot {
    available: u32,
    total: u32,
}

impl From<InvalidSnapshot> for LookupError {
    fn from(err: InvalidSnapshot) -> Self {
        LookupError::Malformed {
            message: err.to_string(),
        }
    }
}

/// Seats available on a bus at the time of a lookup.
///
/// # Examples
///
/// ```
/// use route_fare::availability::AvailabilitySnapshot;
///
/// let snapshot = AvailabilitySnapshot::new(3, 40).unwrap();
/// assert_eq!(snapshot.to_string(), "3 / 40 seats available");
///
/// assert!(AvailabilitySnapshot::new(41, 40).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilitySnapshot {
    available_seats: u32,
    total_seats: u32,
}

impl AvailabilitySnapshot {
    /// Create a snapshot, rejecting `available > total`.
    pub fn new(available_seats: u32, total_seats: u32) -> Result<Self, InvalidSnapshot> {
        if available_seats > total_seats {
            return Err(InvalidSnapshot {
                available: available_seats,
                total: total_seats,
            });
        }

        Ok(Self {
            available_seats,
            total_seats,
        })
    }

    /// Decode a seat endpoint response body.
    pub fn from_json(body: &str) -> Result<Self, LookupError> {
        let response: SeatsResponse =
            serde_json::from_str(body).map_err(|e| LookupError::Malformed {
                message: e.to_string(),
            })?;
        Ok(Self::try_from(response)?)
    }

    /// Seats still free.
    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Seats on the bus.
    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    /// Returns true if `seats` can be booked.
    pub fn can_seat(&self, seats: u32) -> bool {
        seats <= self.available_seats
    }
}

impl TryFrom<SeatsResponse> for AvailabilitySnapshot {
    type Error = InvalidSnapshot;

    fn try_from(value: SeatsResponse) -> Result<Self, Self::Error> {
        AvailabilitySnapshot::new(value.available_seats, value.total_seats)
    }
}

impl fmt::Display for AvailabilitySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} seats available",
            self.available_seats, self.total_seats
        )
    }
}
