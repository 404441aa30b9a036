//! Selection controller configuration.

use std::time::Duration;

/// Most seats one booking may hold.
const DEFAULT_MAX_SEATS: u32 = 10;

/// How long to wait for an availability answer.
const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the selection controller.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Seat counts above this are rejected locally without a lookup.
    pub max_seats: u32,

    /// A lookup still pending after this long counts as failed.
    pub lookup_timeout: Duration,

    /// Decimal places shown when formatting fares.
    pub currency_decimals: usize,
}

impl SelectionConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_seats: u32, lookup_timeout: Duration, currency_decimals: usize) -> Self {
        Self {
            max_seats,
            lookup_timeout,
            currency_decimals,
        }
    }

    /// Set the per-booking seat limit.
    pub fn with_max_seats(mut self, max_seats: u32) -> Self {
        self.max_seats = max_seats;
        self
    }

    /// Set the lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Set the number of decimal places used for display.
    pub fn with_currency_decimals(mut self, decimals: usize) -> Self {
        self.currency_decimals = decimals;
        self
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_seats: DEFAULT_MAX_SEATS,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            currency_decimals: 2,
        }
    }
}
