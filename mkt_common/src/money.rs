use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const CENTS_PER_UNIT: i64 = 100;

//--------------------------------------       Money         ---------------------------------------------------------
/// A currency amount, held as a whole number of cents.
///
/// On the wire, amounts are plain JSON numbers in currency units (`12.5` is twelve and a half), so that clients see
/// the same representation the marketplace has always used. In the database they are stored as integer cents, which
/// keeps sums and comparisons exact.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[sqlx(transparent)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, AddAssign, add_assign);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a money amount: {0}")]
pub struct MoneyConversionError(String);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_units(units: i64) -> Self {
        Self(units * CENTS_PER_UNIT)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyConversionError;

    /// Rounds to the nearest cent, with halves rounded away from zero.
    ///
    /// Rounding works on the shortest decimal form of the float, which is the amount the sender wrote. `1.005` is
    /// stored as a binary fraction slightly below 1.005, but still converts to 1.01.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(MoneyConversionError(format!("{value} is not a finite number")));
        }
        if value.abs() >= (i64::MAX / CENTS_PER_UNIT) as f64 {
            return Err(MoneyConversionError(format!("{value} is out of range")));
        }
        let text = value.abs().to_string();
        let (units, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let units = units.parse::<i64>().map_err(|e| MoneyConversionError(format!("{value}: {e}")))?;
        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let half_up = i64::from(digits.next().is_some_and(|d| d >= 5));
        let cents = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + half_up))
            .ok_or_else(|| MoneyConversionError(format!("{value} is out of range")))?;
        Ok(Self(if value < 0.0 { -cents } else { cents }))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_unit = CENTS_PER_UNIT.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / per_unit, abs % per_unit)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        if self.0 % CENTS_PER_UNIT == 0 {
            serializer.serialize_i64(self.0 / CENTS_PER_UNIT)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        let value = f64::deserialize(deserializer)?;
        Money::try_from(value).map_err(serde::de::Error::custom)
    }
}
