//! Live seat availability.
//!
//! The selection controller reconciles a requested seat count against the
//! seats still free on the bus. Availability comes from an external,
//! asynchronous source behind the [`AvailabilityLookup`] trait:
//! - answers are `{available_seats, total_seats}` pairs
//! - any failure is transient from the form's point of view
//! - nothing here caches answers between lookups

mod error;
mod fixture;
mod lookup;
mod types;

pub use error::LookupError;
pub use fixture::FixtureAvailability;
pub use lookup::{AvailabilityLookup, AvailabilityQuery, StaticAvailability, check_with_timeout};
pub use types::{AvailabilitySnapshot, InvalidSnapshot, SeatsResponse};
