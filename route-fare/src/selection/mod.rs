//! Booking form selection handling.
//!
//! The controller turns origin, destination and seat-count changes into
//! filtered destinations, a fare and a seat-count verdict.

mod config;
mod controller;
mod verdict;


pub use config::SelectionConfig;
pub use controller::{
    DestinationOption, LookupOutcome, LookupTicket, Selection, SelectionController,
    SelectionState, SelectionView,
};
pub use verdict::{AvailabilityDisplay, UNAVAILABLE_TEXT, Verdict};
