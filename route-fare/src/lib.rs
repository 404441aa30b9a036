//! Route fare calculator for a bus seat-booking form.
//!
//! Answers three questions as the user fills in the form: which stops can
//! I travel to from here, what will it cost for this many seats, and are
//! there enough seats left?

pub mod availability;
pub mod domain;
pub mod route_data;
pub mod selection;
