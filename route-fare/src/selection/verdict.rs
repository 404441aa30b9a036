//! Seat-count verdicts and availability display state.

use std::fmt;

use serde::Serialize;

use crate::availability::{AvailabilitySnapshot, LookupError};

/// Shown when an availability lookup fails.
pub const UNAVAILABLE_TEXT: &str = "Unable to load seats";

/// Whether the requested seat count can be booked.
///
/// Only `Insufficient` and `OverLimit` block the form; an `Unknown` verdict
/// is a hint that availability couldn't be confirmed, never a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// No availability check has completed for the current selection
    Unchecked,

    /// Enough seats are free
    Ok,

    /// Fewer seats are free than requested
    Insufficient { requested: u32, available: u32 },

    /// More seats than one booking may hold
    OverLimit { max: u32 },

    /// Availability could not be determined
    Unknown,
}

impl Verdict {
    /// Verdict for a completed lookup.
    pub fn from_lookup(requested: u32, result: &Result<AvailabilitySnapshot, LookupError>) -> Self {
        match result {
            Ok(snapshot) if snapshot.can_seat(requested) => Verdict::Ok,
            Ok(snapshot) => Verdict::Insufficient {
                requested,
                available: snapshot.available_seats(),
            },
            Err(_) => Verdict::Unknown,
        }
    }

    /// Returns true if the form should refuse to submit.
    pub fn blocks_submission(&self) -> bool {
        matches!(self, Verdict::Insufficient { .. } | Verdict::OverLimit { .. })
    }

    /// Constraint message for the seat-count field, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Verdict::Insufficient { .. } => Some("Not enough seats available.".to_string()),
            Verdict::OverLimit { max } => Some(format!("Maximum {max} seats allowed.")),
            Verdict::Unchecked | Verdict::Ok | Verdict::Unknown => None,
        }
    }
}

/// What the availability box shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityDisplay {
    /// Nothing known for the current origin/destination pair
    #[default]
    Blank,

    /// Latest answer for the current pair
    Seats(AvailabilitySnapshot),

    /// Latest lookup failed
    Unavailable,
}

impl AvailabilityDisplay {
    /// Display state for a completed lookup.
    pub fn from_lookup(result: &Result<AvailabilitySnapshot, LookupError>) -> Self {
        match result {
            Ok(snapshot) => AvailabilityDisplay::Seats(*snapshot),
            Err(_) => AvailabilityDisplay::Unavailable,
        }
    }

    /// Returns the snapshot, if the last lookup succeeded.
    pub fn snapshot(&self) -> Option<AvailabilitySnapshot> {
        match self {
            AvailabilityDisplay::Seats(snapshot) => Some(*snapshot),
            AvailabilityDisplay::Blank | AvailabilityDisplay::Unavailable => None,
        }
    }
}

impl fmt::Display for AvailabilityDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityDisplay::Blank => Ok(()),
            AvailabilityDisplay::Seats(snapshot) => write!(f, "{snapshot}"),
            AvailabilityDisplay::Unavailable => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(available: u32, total: u32) -> AvailabilitySnapshot {
        AvailabilitySnapshot::new(available, total).unwrap()
    }

    #[test]
    fn verdict_from_successful_lookup() {
        assert_eq!(Verdict::from_lookup(3, &Ok(snapshot(3, 40))), Verdict::Ok);
        assert_eq!(Verdict::from_lookup(1, &Ok(snapshot(3, 40))), Verdict::Ok);
        assert_eq!(
            Verdict::from_lookup(5, &Ok(snapshot(3, 40))),
            Verdict::Insufficient {
                requested: 5,
                available: 3
            }
        );
    }

    #[test]
    fn verdict_from_failed_lookup() {
        let result = Err(LookupError::Unavailable("offline".into()));
        assert_eq!(Verdict::from_lookup(5, &result), Verdict::Unknown);
    }

    #[test]
    fn only_insufficient_and_over_limit_block() {
        assert!(!Verdict::Unchecked.blocks_submission());
        assert!(!Verdict::Ok.blocks_submission());
        assert!(!Verdict::Unknown.blocks_submission());
        assert!(
            Verdict::Insufficient {
                requested: 2,
                available: 1
            }
            .blocks_submission()
        );
        assert!(Verdict::OverLimit { max: 10 }.blocks_submission());
    }

    #[test]
    fn messages() {
        let insufficient = Verdict::Insufficient {
            requested: 5,
            available: 3,
        };
        assert_eq!(
            insufficient.message().as_deref(),
            Some("Not enough seats available.")
        );
        assert_eq!(
            Verdict::OverLimit { max: 10 }.message().as_deref(),
            Some("Maximum 10 seats allowed.")
        );
        assert_eq!(Verdict::Unknown.message(), None);
        assert_eq!(Verdict::Ok.message(), None);
    }

    #[test]
    fn verdict_serializes_with_tag() {
        let json = serde_json::to_value(Verdict::Insufficient {
            requested: 5,
            available: 3,
        })
        .unwrap();
        assert_eq!(json["verdict"], "insufficient");
        assert_eq!(json["available"], 3);

        let json = serde_json::to_value(Verdict::Unknown).unwrap();
        assert_eq!(json["verdict"], "unknown");
    }

    #[test]
    fn display_text() {
        assert_eq!(AvailabilityDisplay::Blank.to_string(), "");
        assert_eq!(
            AvailabilityDisplay::Seats(snapshot(3, 40)).to_string(),
            "3 / 40 seats available"
        );
        assert_eq!(
            AvailabilityDisplay::Unavailable.to_string(),
            "Unable to load seats"
        );
    }

    #[test]
    fn display_from_lookup() {
        assert_eq!(
            AvailabilityDisplay::from_lookup(&Ok(snapshot(3, 40))),
            AvailabilityDisplay::Seats(snapshot(3, 40))
        );
        assert_eq!(
            AvailabilityDisplay::from_lookup(&Err(LookupError::TimedOut(
                std::time::Duration::from_secs(1)
            ))),
            AvailabilityDisplay::Unavailable
        );
        assert_eq!(AvailabilityDisplay::Unavailable.snapshot(), None);
    }
}
