//! Fare amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::Serialize;

/// Error returned when a fare amount is negative or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid fare {value}: {reason}")]
pub struct InvalidFare {
    value: f64,
    reason: &'static str,
}

/// A non-negative fare amount in the route's currency.
///
/// Amounts keep full precision while being summed and multiplied; rounding
/// to currency precision only happens in [`Fare::format`] and `Display`.
/// Sums are only finite for fares drawn from one validated route; see
/// [`RouteIndex::build`](super::RouteIndex::build).
///
/// # Examples
///
/// ```
/// use route_fare::domain::Fare;
///
/// let leg = Fare::new(12.346).unwrap();
/// assert_eq!(leg.to_string(), "12.35");
///
/// assert!(Fare::new(-1.0).is_err());
/// assert!(Fare::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Fare(f64);

impl Fare {
    /// The zero fare.
    pub const ZERO: Fare = Fare(0.0);

    /// Create a fare, rejecting negative and non-finite amounts.
    pub fn new(amount: f64) -> Result<Self, InvalidFare> {
        if !amount.is_finite() {
            return Err(InvalidFare {
                value: amount,
                reason: "must be a finite number",
            });
        }

        if amount < 0.0 {
            return Err(InvalidFare {
                value: amount,
                reason: "must not be negative",
            });
        }

        // Folds -0.0 into 0.0 so it never formats as "-0.00"
        Ok(Fare(amount + 0.0))
    }

    /// Returns the raw amount.
    pub fn amount(self) -> f64 {
        self.0
    }

    /// Returns true if the fare is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Multiply the fare by a seat count.
    ///
    /// Returns `None` if the product is too large to represent.
    pub fn times(self, seats: u32) -> Option<Fare> {
        let total = self.0 * f64::from(seats);
        total.is_finite().then_some(Fare(total))
    }

    /// Format the amount rounded to `decimals` places.
    pub fn format(self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.0)
    }
}

impl Add for Fare {
    type Output = Fare;

    fn add(self, rhs: Fare) -> Fare {
        Fare(self.0 + rhs.0)
    }
}

impl Sum for Fare {
    fn sum<I: Iterator<Item = Fare>>(iter: I) -> Fare {
        iter.fold(Fare::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Fare> for Fare {
    fn sum<I: Iterator<Item = &'a Fare>>(iter: I) -> Fare {
        iter.copied().sum()
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Fare {
    type Error = InvalidFare;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Fare::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fare(amount: f64) -> Fare {
        Fare::new(amount).unwrap()
    }

    #[test]
    fn accepts_zero_and_positive() {
        assert!(Fare::new(0.0).is_ok());
        assert!(Fare::new(10.0).is_ok());
        assert!(Fare::new(0.01).is_ok());
    }

    #[test]
    fn rejects_negative() {
        let err = Fare::new(-0.5).unwrap_err();
        assert_eq!(err.to_string(), "invalid fare -0.5: must not be negative");
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Fare::new(f64::NAN).is_err());
        assert!(Fare::new(f64::INFINITY).is_err());
        assert!(Fare::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn negative_zero_formats_as_zero() {
        assert_eq!(fare(-0.0).to_string(), "0.00");
        assert!(fare(-0.0).is_zero());
    }

    #[test]
    fn display_rounds_to_two_places() {
        assert_eq!(fare(25.0).to_string(), "25.00");
        assert_eq!(fare(2.5).to_string(), "2.50");
        assert_eq!(fare(1.0062).to_string(), "1.01");
    }

    #[test]
    fn format_with_custom_precision() {
        assert_eq!(fare(7.0).format(0), "7");
        assert_eq!(fare(7.125).format(3), "7.125");
    }

    #[test]
    fn rounding_happens_only_at_display() {
        // Three legs of 0.333 sum to 0.999, which displays as 1.00;
        // rounding each leg first would give 0.99.
        let total: Fare = [fare(0.333), fare(0.333), fare(0.333)].iter().sum();
        assert_eq!(total.to_string(), "1.00");
    }

    #[test]
    fn times_seat_count() {
        assert_eq!(fare(25.0).times(3), Some(fare(75.0)));
        assert_eq!(fare(25.0).times(0), Some(Fare::ZERO));
    }

    #[test]
    fn times_overflow_is_none() {
        assert_eq!(fare(f64::MAX).times(2), None);
        assert_eq!(fare(f64::MAX).times(1), Some(fare(f64::MAX)));
    }

    #[test]
    fn sum_of_empty_is_zero() {
        let total: Fare = std::iter::empty::<Fare>().sum();
        assert_eq!(total, Fare::ZERO);
    }
}
