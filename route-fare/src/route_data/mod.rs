//! Route data supplied by the hosting page.
//!
//! Route definitions arrive as JSON in one of several historical shapes:
//! explicit sequence numbers or plain physical order, and leg fares either
//! inline on each stop or in a side table keyed by stop id. All of them are
//! normalized here into a single sequence-based `RouteIndex`.

mod convert;
mod error;
mod types;

pub use convert::convert_route;
pub use error::RouteDataError;
pub use types::{RouteData, StopData};
