//! Route data error types.

use crate::domain::InvalidRouteError;

/// Errors from loading route data.
#[derive(Debug, thiserror::Error)]
pub enum RouteDataError {
    /// Route file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Route JSON could not be parsed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Route JSON parsed but describes an invalid route
    #[error("invalid route: {0}")]
    Route(#[from] InvalidRouteError),
}
