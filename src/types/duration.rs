//! Note values as exact fractions of a whole note
//!
//! Durations never round: a triplet eighth is exactly 1/12 and any sum of
//! durations lands on the same position however it was accumulated.

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedSub, Zero};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Rem, Sub};

/// Length of a note or rest, in whole notes.
///
/// Backed by `Ratio<i64>`: the operators panic if a reduced numerator or
/// denominator leaves `i64`, which takes coprime denominators around
/// 2^32 each. Use [`Duration::checked_add`] and [`Duration::checked_sub`]
/// where inputs are not bounded note values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration(Ratio<i64>);

impl Duration {
    pub const WHOLE: Duration = Duration(Ratio::new_raw(1, 1));
    pub const HALF: Duration = Duration(Ratio::new_raw(1, 2));
    pub const QUARTER: Duration = Duration(Ratio::new_raw(1, 4));
    pub const EIGHTH: Duration = Duration(Ratio::new_raw(1, 8));
    pub const SIXTEENTH: Duration = Duration(Ratio::new_raw(1, 16));

    /// `numerator / denominator` whole notes, reduced.
    ///
    /// Panics if `denominator` is zero, like [`Ratio::new`].
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Duration(Ratio::new(numerator, denominator))
    }

    pub fn from_ratio(ratio: Ratio<i64>) -> Self {
        Duration(ratio)
    }

    pub fn as_ratio(&self) -> Ratio<i64> {
        self.0
    }

    /// One and a half times as long
    pub fn dotted(self) -> Self {
        Duration(self.0 * Ratio::new_raw(3, 2))
    }

    /// Length of one note of a tuplet that fits `count` notes into the
    /// time of `in_time_of` (a triplet is `tuplet(3, 2)`).
    pub fn tuplet(self, count: i64, in_time_of: i64) -> Self {
        Duration(self.0 * Ratio::new(in_time_of, count))
    }

    /// How many whole `rhs` fit into `self`, rounding towards negative
    /// infinity
    pub fn div_floor(self, rhs: Duration) -> i64 {
        (self.0 / rhs.0).floor().to_integer()
    }

    /// Sum, or `None` if it does not fit in `Ratio<i64>`
    pub fn checked_add(self, rhs: Duration) -> Option<Duration> {
        self.0.checked_add(&rhs.0).map(Duration)
    }

    pub fn checked_sub(self, rhs: Duration) -> Option<Duration> {
        self.0.checked_sub(&rhs.0).map(Duration)
    }

    /// Floored quotient and the non-negative remainder (for positive `rhs`)
    pub fn div_rem(self, rhs: Duration) -> (i64, Duration) {
        let quotient = self.div_floor(rhs);
        (quotient, Duration(self.0 - rhs.0 * quotient))
    }
}

impl Zero for Duration {
    fn zero() -> Self {
        Duration(Ratio::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::zero()
    }
}

impl From<Ratio<i64>> for Duration {
    fn from(ratio: Ratio<i64>) -> Self {
        Duration(ratio)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0 + rhs.0)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, rhs: i64) -> Duration {
        Duration(self.0 * rhs)
    }
}

impl Mul<Duration> for i64 {
    type Output = Duration;

    fn mul(self, rhs: Duration) -> Duration {
        rhs * self
    }
}

/// Product of two lengths, e.g. half of a half
impl Mul for Duration {
    type Output = Duration;

    fn mul(self, rhs: Duration) -> Duration {
        Duration(self.0 * rhs.0)
    }
}

impl Mul<Ratio<i64>> for Duration {
    type Output = Duration;

    fn mul(self, rhs: Ratio<i64>) -> Duration {
        Duration(self.0 * rhs)
    }
}

impl Div<i64> for Duration {
    type Output = Duration;

    fn div(self, rhs: i64) -> Duration {
        Duration(self.0 / rhs)
    }
}

impl Div<Ratio<i64>> for Duration {
    type Output = Duration;

    fn div(self, rhs: Ratio<i64>) -> Duration {
        Duration(self.0 / rhs)
    }
}

/// Ratio of two durations
impl Div for Duration {
    type Output = Ratio<i64>;

    fn div(self, rhs: Duration) -> Ratio<i64> {
        self.0 / rhs.0
    }
}

/// Floored remainder, consistent with [`Duration::div_rem`]
impl Rem for Duration {
    type Output = Duration;

    fn rem(self, rhs: Duration) -> Duration {
        self.div_rem(rhs).1
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Duration> for Duration {
    fn sum<I: Iterator<Item = &'a Duration>>(iter: I) -> Duration {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators() {
        assert_eq!(Duration::QUARTER + Duration::QUARTER, Duration::HALF);
        assert_eq!(
            Duration::WHOLE - Duration::QUARTER - Duration::QUARTER,
            Duration::HALF
        );
        assert_eq!(4 * Duration::SIXTEENTH, Duration::QUARTER);
        assert_eq!(Duration::EIGHTH / 2, Duration::SIXTEENTH);
        assert_eq!(
            (Duration::HALF + Duration::EIGHTH) % Duration::HALF,
            Duration::EIGHTH
        );
    }

    #[test]
    fn test_products_and_scaling() {
        assert_eq!(Duration::HALF * Duration::HALF, Duration::QUARTER);
        assert_eq!(Duration::WHOLE * Duration::EIGHTH, Duration::EIGHTH);
        assert_eq!(Duration::QUARTER * Ratio::new(2, 3), Duration::new(1, 6));
        assert_eq!(Duration::QUARTER / Ratio::new(3, 2), Duration::new(1, 6));
        assert_eq!(
            Duration::EIGHTH / Ratio::new(3, 2),
            Duration::EIGHTH.tuplet(3, 2)
        );
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Duration::new(1, (1 << 40) + 1);
        let b = Duration::new(1, (1 << 40) - 1);
        assert_eq!(a.checked_add(b), None);
        assert_eq!(a.checked_sub(b), None);

        assert_eq!(
            Duration::HALF.checked_add(Duration::QUARTER),
            Some(Duration::new(3, 4))
        );
        assert_eq!(
            Duration::HALF.checked_sub(Duration::QUARTER),
            Some(Duration::QUARTER)
        );
    }

    #[test]
    fn test_constants_match_new() {
        assert_eq!(Duration::WHOLE, Duration::new(4, 4));
        assert_eq!(Duration::HALF, Duration::new(2, 4));
        assert_eq!(Duration::SIXTEENTH, Duration::new(1, 16));
    }

    #[test]
    fn test_dotted_and_tuplets() {
        assert_eq!(Duration::QUARTER.dotted(), Duration::new(3, 8));
        assert_eq!(Duration::EIGHTH.tuplet(3, 2), Duration::new(1, 12));
        assert_eq!(Duration::EIGHTH.tuplet(3, 2) * 3, Duration::QUARTER);
    }

    #[test]
    fn test_division() {
        assert_eq!(Duration::WHOLE / Duration::QUARTER, Ratio::from_integer(4));
        assert_eq!(Duration::new(7, 8).div_floor(Duration::QUARTER), 3);
        assert_eq!(
            Duration::new(7, 8).div_rem(Duration::QUARTER),
            (3, Duration::EIGHTH)
        );
        assert_eq!(
            Duration::new(-1, 8).div_rem(Duration::QUARTER),
            (-1, Duration::EIGHTH)
        );
    }

    #[test]
    fn test_sum_and_display() {
        let values = [Duration::HALF, Duration::QUARTER, Duration::EIGHTH];
        assert_eq!(values.iter().sum::<Duration>(), Duration::new(7, 8));
        assert_eq!(Duration::new(7, 8).to_string(), "7/8");
        assert_eq!(Duration::WHOLE.to_string(), "1");
        assert!(Vec::<Duration>::new().into_iter().sum::<Duration>().is_zero());
    }

    #[test]
    fn test_ordering() {
        assert!(Duration::EIGHTH < Duration::QUARTER);
        assert!(Duration::QUARTER.dotted() > Duration::QUARTER);
    }
}
