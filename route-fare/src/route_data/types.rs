//! Route data wire types.
//!
//! These mirror the JSON the hosting page embeds. They are not validated;
//! see `convert` for the conversion into a `RouteIndex`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Route definition for one bus.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteData {
    /// Bus identifier used for availability lookups
    #[serde(default)]
    pub bus_id: Option<String>,

    /// Stops in physical order
    pub stops: Vec<StopData>,

    /// Side-loaded leg fares keyed by stop id
    #[serde(default)]
    pub fares: HashMap<String, f64>,
}

/// One stop as supplied by the page.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopData {
    pub id: String,

    pub label: String,

    /// Explicit position; when every stop omits it, position is the index
    #[serde(default)]
    pub sequence: Option<u32>,

    /// Inline leg fare; falls back to the route's fare table
    #[serde(default)]
    pub leg_fare: Option<f64>,
}
