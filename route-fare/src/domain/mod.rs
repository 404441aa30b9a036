//! Domain types for the route fare calculator.
//!
//! This module contains the core domain model: stops, fares and the route
//! index built from them. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod fare;
mod route;
mod stop;

pub use error::{InvalidRouteError, InvalidSegmentError};
pub use fare::{Fare, InvalidFare};
pub use route::RouteIndex;
pub use stop::{Stop, StopId};
