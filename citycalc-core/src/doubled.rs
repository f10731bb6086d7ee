//! Doubled-integer fixed point for exact, reproducible halves.
//!
//! Many yields in the rules are half units (a grassland gives 1.5 food, a shrine
//! 0.5 magic power). Every amount that can carry a half is stored doubled, summed
//! as an integer, and halved exactly once when the production line is finalized.
//! Floats are never used for sim values.

use citycalc_data::RoundingDirection;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// An integer equal to twice the true quantity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Doubled(pub i32);

impl Doubled {
    pub const ZERO: Doubled = Doubled(0);

    /// Create from an already-doubled raw value.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Doubled(raw)
    }

    /// Raw doubled value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whether the value halves without remainder.
    #[inline]
    pub const fn is_exact(self) -> bool {
        self.0 % 2 == 0
    }

    /// Halve back to a whole amount.
    ///
    /// Returns `None` when the direction demands an exact multiple and the value is odd.
    pub fn halve(self, rounding: RoundingDirection) -> Option<i32> {
        match rounding {
            RoundingDirection::MustBeExactMultiple => self.is_exact().then_some(self.0 / 2),
            RoundingDirection::RoundDown => Some(self.0.div_euclid(2)),
            RoundingDirection::RoundUp => Some(-((-self.0).div_euclid(2))),
        }
    }

    /// Add a percentage of this value to itself, flooring the added part.
    ///
    /// `Doubled(3).plus_percent(50)` is `Doubled(4)`: 3 + floor(1.5).
    #[inline]
    pub fn plus_percent(self, percentage: i32) -> Doubled {
        Doubled(self.0 + percent_of(self.0, percentage))
    }
}

/// `floor(amount × percentage / 100)`, computed without overflow.
#[inline]
pub fn percent_of(amount: i32, percentage: i32) -> i32 {
    (amount as i64 * percentage as i64).div_euclid(100) as i32
}

impl Add for Doubled {
    type Output = Doubled;
    #[inline]
    fn add(self, other: Doubled) -> Doubled {
        Doubled(self.0 + other.0)
    }
}

impl AddAssign for Doubled {
    #[inline]
    fn add_assign(&mut self, other: Doubled) {
        self.0 += other.0;
    }
}

impl Sub for Doubled {
    type Output = Doubled;
    #[inline]
    fn sub(self, other: Doubled) -> Doubled {
        Doubled(self.0 - other.0)
    }
}

impl SubAssign for Doubled {
    #[inline]
    fn sub_assign(&mut self, other: Doubled) {
        self.0 -= other.0;
    }
}

impl Neg for Doubled {
    type Output = Doubled;
    #[inline]
    fn neg(self) -> Doubled {
        Doubled(-self.0)
    }
}

/// Scale by a count (persons, tiles, picks).
impl Mul<i32> for Doubled {
    type Output = Doubled;
    #[inline]
    fn mul(self, count: i32) -> Doubled {
        Doubled(self.0 * count)
    }
}

impl Sum for Doubled {
    fn sum<I: Iterator<Item = Doubled>>(iter: I) -> Doubled {
        iter.fold(Doubled::ZERO, |acc, d| acc + d)
    }
}

impl std::fmt::Debug for Doubled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Doubled({} = {})", self.0, self)
    }
}

impl std::fmt::Display for Doubled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / 2;
        if self.is_exact() {
            write!(f, "{}", whole)
        } else if self.0 < 0 && whole == 0 {
            write!(f, "-0.5")
        } else {
            write!(f, "{}.5", whole)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Doubled::ZERO.0, 0);
        assert_eq!(Doubled::from_raw(7).raw(), 7);
    }

    #[test]
    fn test_halve_directions() {
        assert_eq!(Doubled(7).halve(RoundingDirection::RoundDown), Some(3));
        assert_eq!(Doubled(7).halve(RoundingDirection::RoundUp), Some(4));
        assert_eq!(Doubled(7).halve(RoundingDirection::MustBeExactMultiple), None);
        assert_eq!(Doubled(8).halve(RoundingDirection::MustBeExactMultiple), Some(4));
    }

    #[test]
    fn test_halve_negative_floors_and_ceils() {
        assert_eq!(Doubled(-3).halve(RoundingDirection::RoundDown), Some(-2));
        assert_eq!(Doubled(-3).halve(RoundingDirection::RoundUp), Some(-1));
    }

    #[test]
    fn test_plus_percent_floors_added_part() {
        // Shrine: 0.5 magic power doubled = 1, +50% = 1 + floor(0.5) = 1
        assert_eq!(Doubled(1).plus_percent(50), Doubled(1));
        // Temple: 1 doubled = 2, +50% = 3
        assert_eq!(Doubled(2).plus_percent(50), Doubled(3));
        assert_eq!(Doubled(10).plus_percent(0), Doubled(10));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(33, 50), 16);
        assert_eq!(percent_of(17, 45), 7);
        assert_eq!(percent_of(-5, 50), -3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Doubled(6).to_string(), "3");
        assert_eq!(Doubled(7).to_string(), "3.5");
        assert_eq!(Doubled(-1).to_string(), "-0.5");
        assert_eq!(Doubled(-3).to_string(), "-1.5");
    }

    #[test]
    fn test_sum_and_scale() {
        let total: Doubled = [Doubled(3), Doubled(1), Doubled(2)].into_iter().sum();
        assert_eq!(total, Doubled(6));
        assert_eq!(Doubled(3) * 4, Doubled(12));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn doubled_value() -> impl Strategy<Value = i32> {
            -1_000_000..=1_000_000i32
        }

        proptest! {
            /// Property: round down is floor(x / 2)
            #[test]
            fn round_down_is_floor(x in doubled_value()) {
                let expected = (x as f64 / 2.0).floor() as i32;
                prop_assert_eq!(Doubled(x).halve(RoundingDirection::RoundDown), Some(expected));
            }

            /// Property: round up is ceil(x / 2)
            #[test]
            fn round_up_is_ceil(x in doubled_value()) {
                let expected = (x as f64 / 2.0).ceil() as i32;
                prop_assert_eq!(Doubled(x).halve(RoundingDirection::RoundUp), Some(expected));
            }

            /// Property: exact multiple fails exactly on odd values
            #[test]
            fn exact_multiple_fails_on_odd(x in doubled_value()) {
                let result = Doubled(x).halve(RoundingDirection::MustBeExactMultiple);
                prop_assert_eq!(result.is_none(), x % 2 != 0);
            }

            /// Property: whole values survive a round trip through doubling
            #[test]
            fn whole_round_trip(x in -100_000..=100_000i32) {
                for rounding in [
                    RoundingDirection::MustBeExactMultiple,
                    RoundingDirection::RoundDown,
                    RoundingDirection::RoundUp,
                ] {
                    prop_assert_eq!(Doubled::from_raw(x * 2).halve(rounding), Some(x));
                }
            }
        }
    }
}
