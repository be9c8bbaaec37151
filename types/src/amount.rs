//! Token amount type for BGEO.
//!
//! Amounts travel as decimal strings end to end: the wire format carries them
//! as strings, and the raw string a user entered is preserved verbatim until
//! arithmetic forces a re-render. Arithmetic goes through `f64`, so summed
//! amounts inherit IEEE-754 rounding (`0.1 + 0.2` renders as
//! `0.30000000000000004`). This is a known limitation of the amount
//! representation, not currency-safe fixed point.

use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A BGEO amount, held as the decimal string it was parsed from.
///
/// Equality is raw-string equality. Two amounts with the same numeric value
/// but different renderings (`"12"` vs `"12.0"`) compare unequal; use
/// [`Amount::value`] for numeric comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Parse an amount from raw input, trimming surrounding whitespace.
    ///
    /// The string must parse as a finite, non-negative `f64`. The original
    /// rendering is kept, so `"2.50"` stays `"2.50"` until it is summed.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| TypeError::AmountNotNumeric(trimmed.to_string()))?;
        if !value.is_finite() {
            return Err(TypeError::AmountNotFinite(trimmed.to_string()));
        }
        if value < 0.0 {
            return Err(TypeError::AmountNegative(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// An amount of zero, rendered as `"0"`.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// The numeric value of this amount.
    pub fn value(&self) -> f64 {
        // Construction validated the string, so this cannot fail.
        self.0.parse().unwrap_or(0.0)
    }

    /// Sum two amounts, re-rendering the result from `f64`.
    ///
    /// `f64`'s `Display` uses shortest-roundtrip formatting, so `10 + 2.5`
    /// renders `"12.5"` and `10 + 2` renders `"12"`.
    pub fn plus(&self, other: &Amount) -> Amount {
        Amount(format!("{}", self.value() + other.value()))
    }

    pub fn is_zero(&self) -> bool {
        self.value() == 0.0
    }

    /// Return the raw decimal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
