//! Conversion from route wire types to the domain `RouteIndex`.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{Fare, InvalidRouteError, RouteIndex, Stop, StopId};

use super::error::RouteDataError;
use super::types::{RouteData, StopData};

impl RouteData {
    /// Parse route data from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RouteDataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse route data from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RouteDataError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RouteDataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build the route index for this data.
    pub fn to_route(&self) -> Result<RouteIndex, InvalidRouteError> {
        convert_route(self)
    }
}

/// Convert route data into a validated `RouteIndex`.
///
/// - Sequences come from the data when every stop has one, or from the stop's
///   index when none do.
/// - Leg fares come from the stop itself, then from the fare table, then
///   default to zero.
pub fn convert_route(data: &RouteData) -> Result<RouteIndex, InvalidRouteError> {
    let explicit = data.stops.iter().filter(|s| s.sequence.is_some()).count();
    let by_index = explicit == 0;
    if !by_index && explicit != data.stops.len() {
        return Err(InvalidRouteError::MixedSequencing);
    }

    let mut legs = Vec::with_capacity(data.stops.len());
    for (position, stop) in data.stops.iter().enumerate() {
        legs.push((stop, resolve_leg_fare(data, stop, position == 0)?));
    }

    let route = if by_index {
        let unnumbered = legs
            .into_iter()
            .map(|(stop, leg_fare)| (stop.id.as_str(), stop.label.clone(), leg_fare));
        RouteIndex::by_index(unnumbered)?
    } else {
        let stops = legs
            .into_iter()
            .filter_map(|(stop, leg_fare)| {
                let sequence = stop.sequence?;
                Some(Stop::new(stop.id.as_str(), stop.label.as_str(), sequence, leg_fare))
            })
            .collect();
        RouteIndex::build(stops)?
    };
    debug!(
        stops = route.len(),
        by_index,
        bus_id = data.bus_id.as_deref().unwrap_or(""),
        "built route index"
    );
    Ok(route)
}

fn resolve_leg_fare(
    data: &RouteData,
    stop: &StopData,
    is_first: bool,
) -> Result<Fare, InvalidRouteError> {
    let amount = match stop.leg_fare.or_else(|| data.fares.get(&stop.id).copied()) {
        Some(amount) => amount,
        None => {
            if !is_first {
                warn!(stop = %stop.id, "no leg fare for stop, charging 0");
            }
            0.0
        }
    };

    Fare::new(amount).map_err(|source| InvalidRouteError::InvalidFare {
        stop: StopId::from(stop.id.as_str()),
        source,
    })
}
