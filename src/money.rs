//! Minor-unit currency arithmetic
//!
//! Budgets, order amounts and invested totals are integer minor units
//! (paise) so the conservation invariants hold exactly across allocation
//! passes. Floats appear only at the boundaries: quote feeds, fund units
//! and the projection formula.

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A currency amount in minor units (1/100 of the display unit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Convert from a display-unit value, rounding to the nearest minor unit.
    pub fn from_major(major: f64) -> Self {
        Money((major * 100.0).round() as i64)
    }

    pub fn minor(self) -> i64 {
        self.0
    }

    pub fn as_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Round to a whole display unit (response boundary only).
    pub fn round_major(self) -> i64 {
        // integer round-half-up on minor units, avoids f64 detours
        (self.0 + 50).div_euclid(100)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Equal split across `n` recipients, flooring the remainder away.
    pub fn split(self, n: u64) -> Money {
        if n == 0 {
            return Money::ZERO;
        }
        Money(self.0 / n as i64)
    }

    /// How many whole units priced at `price` fit into this amount.
    pub fn units_of(self, price: Money) -> u64 {
        if price.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        (self.0 / price.0) as u64
    }

    pub fn times(self, n: u64) -> Money {
        Money(self.0 * n as i64)
    }

    /// Largest multiple of `step` that fits into this amount.
    pub fn floor_to(self, step: Money) -> Money {
        if step.0 <= 0 || self.0 <= 0 {
            return Money::ZERO;
        }
        Money((self.0 / step.0) * step.0)
    }

    /// Nearest multiple of `step` (half rounds up).
    pub fn round_to(self, step: Money) -> Money {
        if step.0 <= 0 || self.0 <= 0 {
            return Money::ZERO;
        }
        Money(((self.0 + step.0 / 2) / step.0) * step.0)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_major())
    }
}

// Orders serialize amounts as 2-decimal display-unit numbers.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major())
    }
}

/// Fund units are quoted at 3-decimal precision.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_conversion_rounds_to_minor() {
        assert_eq!(Money::from_major(10.005).minor(), 1001);
        assert_eq!(Money::from_major(100000.0).minor(), 10_000_000);
        assert_eq!(Money::from_minor(1234).as_major(), 12.34);
    }

    #[test]
    fn test_units_of() {
        let budget = Money::from_major(3333.0);
        assert_eq!(budget.units_of(Money::from_major(301.0)), 11);
        assert_eq!(budget.units_of(Money::from_major(9999.0)), 0);
        assert_eq!(budget.units_of(Money::ZERO), 0);
    }

    #[test]
    fn test_multiples() {
        let unit = Money::from_major(500.0);
        assert_eq!(Money::from_major(3333.33).round_to(unit), Money::from_major(3500.0));
        assert_eq!(Money::from_major(3200.0).round_to(unit), Money::from_major(3000.0));
        assert_eq!(Money::from_major(3250.0).round_to(unit), Money::from_major(3500.0));
        assert_eq!(Money::from_major(1499.99).floor_to(unit), Money::from_major(1000.0));
        assert_eq!(Money::from_major(499.99).floor_to(unit), Money::ZERO);
    }

    #[test]
    fn test_round_major() {
        assert_eq!(Money::from_minor(1049).round_major(), 10);
        assert_eq!(Money::from_minor(1050).round_major(), 11);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(10.0 / 3.0), 3.333);
        assert_eq!(round3(1.9995), 2.0);
    }
}
