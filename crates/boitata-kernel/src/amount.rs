// Copyright 2025 PRAGMA
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{ArithmeticError, SafeRatio};
use num::{traits::Zero, BigInt};
use std::{
    fmt::{self, Display},
    ops::{Add, Sub},
    str::FromStr,
};

/// An exact, signed quantity of the chain's native unit.
///
/// Amounts are immutable; arithmetic always produces new values. Parsing is
/// the only fallible entry point: a string that isn't an integer is rejected
/// with [`ArithmeticError::Unparsable`], never coerced to zero. Fee tallies
/// reported by upstream nodes routinely exceed `u64`, hence the big integer
/// representation.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigInt);

impl Amount {
    pub fn zero() -> Self {
        Amount(BigInt::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// This amount as an exact ratio, for fractional arithmetic.
    pub fn as_ratio(&self) -> SafeRatio {
        SafeRatio::from_integer(self.0.clone())
    }
}

impl From<BigInt> for Amount {
    fn from(n: BigInt) -> Self {
        Amount(n)
    }
}

impl From<u64> for Amount {
    fn from(n: u64) -> Self {
        Amount(BigInt::from(n))
    }
}

impl FromStr for Amount {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || ArithmeticError::Unparsable {
            what: "amount",
            value: s.to_string(),
        };

        // `BigInt::from_str` tolerates `_` separators; reject anything that
        // isn't a plain signed decimal integer before handing it over.
        let digits = match s.strip_prefix('-') {
            Some(rest) => rest,
            None => s.strip_prefix('+').unwrap_or(s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unparsable());
        }

        BigInt::from_str(s).map(Amount).map_err(|_| unparsable())
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl Add for &Amount {
    type Output = Amount;

    fn add(self, other: &Amount) -> Amount {
        Amount(&self.0 + &other.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }
}

impl Sub<&Amount> for Amount {
    type Output = Amount;

    fn sub(self, other: &Amount) -> Amount {
        Amount(self.0 - &other.0)
    }
}

impl Sub for &Amount {
    type Output = Amount;

    fn sub(self, other: &Amount) -> Amount {
        Amount(&self.0 - &other.0)
    }
}

impl serde::Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
