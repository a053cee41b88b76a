//! Fixed-point monetary values.
//!
//! Every price in the engine (order limit prices, trade prices, query
//! results) is a [`Price`]: an `i64` count of minor currency units. The
//! scale is chosen by whoever constructs orders; the engine only compares
//! and averages prices, so it never needs to know it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order and fill quantities are whole units.
pub type Quantity = u64;

/// A price in minor currency units (e.g. cents).
///
/// Zero and negative values are valid prices; absence of a price is
/// always expressed with `Option<Price>`, never with a sentinel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub const fn new(minor_units: i64) -> Self {
        Price(minor_units)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Arithmetic mean of two prices, rounded toward negative infinity.
    ///
    /// `midpoint(100, 101) == 100`, `midpoint(-101, -100) == -101`.
    pub fn midpoint(a: Price, b: Price) -> Price {
        let sum = i128::from(a.0) + i128::from(b.0);
        // The mean of two i64 values always fits back into an i64.
        Price(sum.div_euclid(2) as i64)
    }
}

impl From<i64> for Price {
    fn from(minor_units: i64) -> Self {
        Price(minor_units)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
