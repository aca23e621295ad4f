//! Monetary amounts.

use crate::CachewiseError;
use bigdecimal::BigDecimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A salary held as an exact decimal.
///
/// Serialized as a decimal string so cached copies match the stored value
/// digit for digit. JSON numbers are accepted on input and read by their
/// shortest decimal form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Salary(BigDecimal);

impl Salary {
    /// Wraps a decimal amount.
    #[must_use]
    pub fn new(amount: BigDecimal) -> Self {
        Self(amount)
    }

    /// Returns the decimal amount.
    #[must_use]
    pub fn amount(&self) -> &BigDecimal {
        &self.0
    }

    /// Consumes the wrapper and returns the decimal amount.
    #[must_use]
    pub fn into_inner(self) -> BigDecimal {
        self.0
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::from(0)
    }

    /// Number of significant fractional digits (`10.50` has one).
    #[must_use]
    pub fn fractional_digits(&self) -> i64 {
        self.0.normalized().as_bigint_and_exponent().1.max(0)
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Salary {
    type Err = CachewiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigDecimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| CachewiseError::Validation(format!("Invalid salary: {}", s)))
    }
}

impl From<i64> for Salary {
    fn from(value: i64) -> Self {
        Self(BigDecimal::from(value))
    }
}

impl From<BigDecimal> for Salary {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl TryFrom<f64> for Salary {
    type Error = CachewiseError;

    /// Converts through the shortest decimal that reads back as `value`,
    /// so `0.1` becomes exactly `0.1`.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(CachewiseError::Validation(format!("Invalid salary: {}", value)));
        }
        value.to_string().parse()
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SalaryVisitor)
    }
}

struct SalaryVisitor;

impl Visitor<'_> for SalaryVisitor {
    type Value = Salary;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number or decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Salary, E> {
        v.parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Salary, E> {
        Ok(Salary::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Salary, E> {
        Ok(Salary(BigDecimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Salary, E> {
        Salary::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Float(v), &self))
    }
}
