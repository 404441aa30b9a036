//! Fixture-backed availability lookup.
//!
//! Loads seat endpoint bodies from JSON files and serves them as if they
//! were live responses. Useful for development and testing without a
//! running seat endpoint.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::error::LookupError;
use super::lookup::{AvailabilityLookup, AvailabilityQuery};
use super::types::AvailabilitySnapshot;

/// Availability lookup that serves snapshots from JSON files.
#[derive(Debug, Clone)]
pub struct FixtureAvailability {
    /// Pre-loaded snapshots, keyed by bus id.
    snapshots: Arc<RwLock<HashMap<String, AvailabilitySnapshot>>>,
}

impl FixtureAvailability {
    /// Create a new fixture lookup by loading JSON files from a directory.
    ///
    /// Expects files named `{bus_id}.json` (e.g., `42.json`), each holding a
    /// seat endpoint body such as `{"available_seats": 3, "total_seats": 40}`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, LookupError> {
        let snapshots = load_dir(data_dir.as_ref())?;

        Ok(Self {
            snapshots: Arc::new(RwLock::new(snapshots)),
        })
    }

    /// Create a fixture lookup from in-memory snapshots.
    pub fn from_snapshots(
        snapshots: impl IntoIterator<Item = (String, AvailabilitySnapshot)>,
    ) -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(snapshots.into_iter().collect())),
        }
    }

    /// List the bus ids with fixture data.
    pub async fn available_buses(&self) -> Vec<String> {
        let snapshots = self.snapshots.read().await;
        let mut ids: Vec<String> = snapshots.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Replace the snapshot for one bus.
    pub async fn set(&self, bus_id: impl Into<String>, snapshot: AvailabilitySnapshot) {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(bus_id.into(), snapshot);
    }

    /// Reload fixture data from disk.
    ///
    /// On failure the current data is kept.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<usize, LookupError> {
        let fresh = load_dir(data_dir.as_ref())?;
        let count = fresh.len();

        let mut snapshots = self.snapshots.write().await;
        *snapshots = fresh;

        Ok(count)
    }
}

impl AvailabilityLookup for FixtureAvailability {
    async fn check(&self, query: &AvailabilityQuery) -> Result<AvailabilitySnapshot, LookupError> {
        let snapshots = self.snapshots.read().await;

        snapshots
            .get(&query.bus_id)
            .copied()
            .ok_or_else(|| LookupError::NotFound {
                bus_id: query.bus_id.clone(),
            })
    }
}

/// Read every `{bus_id}.json` file in `data_dir`.
fn load_dir(data_dir: &Path) -> Result<HashMap<String, AvailabilitySnapshot>, LookupError> {
    let mut snapshots = HashMap::new();

    let entries = std::fs::read_dir(data_dir).map_err(|e| LookupError::Fixture {
        message: format!("failed to read fixture directory {:?}: {}", data_dir, e),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| LookupError::Fixture {
            message: format!("failed to read directory entry: {}", e),
        })?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        // "42.json" -> "42"
        let bus_id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LookupError::Fixture {
                message: format!("invalid fixture filename: {:?}", path),
            })?;

        let body = std::fs::read_to_string(&path).map_err(|e| LookupError::Fixture {
            message: format!("failed to read {:?}: {}", path, e),
        })?;

        let snapshot = AvailabilitySnapshot::from_json(&body).map_err(|e| LookupError::Fixture {
            message: format!("failed to parse {:?}: {}", path, e),
        })?;

        debug!(bus_id, %snapshot, "loaded availability fixture");
        snapshots.insert(bus_id.to_string(), snapshot);
    }

    if snapshots.is_empty() {
        return Err(LookupError::Fixture {
            message: format!("no fixture files found in {:?}", data_dir),
        });
    }

    Ok(snapshots)
}
