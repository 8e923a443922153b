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

use crate::{parse_decimal, ArithmeticError, SafeRatio};
use num::BigInt;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A fee expressed in the conventional 0–100 range, at arbitrary precision.
///
/// Any arithmetic combining a percentage with an [`crate::Amount`] must go
/// through [`Percentage::as_fraction`], which normalizes to 0–1.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(SafeRatio);

impl Percentage {
    pub fn new(ratio: SafeRatio) -> Self {
        Percentage(ratio)
    }

    /// This percentage as a 0–1 fraction, i.e. divided by 100.
    pub fn as_fraction(&self) -> SafeRatio {
        self.0.clone() / BigInt::from(100)
    }

    /// What remains once this percentage is taken: `100 − self`.
    pub fn complement(&self) -> Percentage {
        Percentage(SafeRatio::from_integer(BigInt::from(100)) - &self.0)
    }
}

impl From<u64> for Percentage {
    fn from(n: u64) -> Self {
        Percentage(SafeRatio::from_integer(BigInt::from(n)))
    }
}

impl FromStr for Percentage {
    type Err = ArithmeticError;

    /// Accepts both decimal notation (`"5"`, `"2.5"`) and the exact `"n/d"`
    /// form produced by [`Display`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || ArithmeticError::Unparsable {
            what: "percentage",
            value: s.to_string(),
        };

        match s.split_once('/') {
            None => parse_decimal("percentage", s).map(Percentage),
            Some((numerator, denominator)) => {
                let numerator = BigInt::from_str(numerator).map_err(|_| unparsable())?;
                let denominator = BigInt::from_str(denominator).map_err(|_| unparsable())?;
                if denominator == BigInt::from(0) {
                    return Err(ArithmeticError::DivisionByZero("percentage denominator"));
                }
                Ok(Percentage(SafeRatio::new(numerator, denominator)))
            }
        }
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0.numer(), self.0.denom())
    }
}

impl serde::Serialize for Percentage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Percentage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safe_ratio;
    use test_case::test_case;

    #[test_case("10", 1, 10; "ten percent")]
    #[test_case("2.5", 1, 40; "two and a half percent")]
    #[test_case("100", 1, 1; "everything")]
    #[test_case("1/3", 1, 300; "exact third")]
    fn as_fraction_normalizes_to_unit_range(input: &str, numerator: u64, denominator: u64) {
        let percentage: Percentage = input.parse().expect("valid percentage");
        assert_eq!(percentage.as_fraction(), safe_ratio(numerator, denominator));
    }

    #[test]
    fn complement_of_fee() {
        let fee: Percentage = "10".parse().expect("valid percentage");
        assert_eq!(fee.complement(), Percentage::from(90));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let fee: Percentage = "2.5".parse().expect("valid percentage");
        assert_eq!(fee.to_string(), "5/2");
        assert_eq!("5/2".parse::<Percentage>(), Ok(fee));
    }

    #[test_case("", "empty")]
    #[test_case("ten", "letters")]
    #[test_case("1/x", "bad denominator")]
    fn rejects_garbage(input: &str, _name: &str) {
        assert!(matches!(
            input.parse::<Percentage>(),
            Err(ArithmeticError::Unparsable { .. })
        ));
    }

    #[test]
    fn rejects_zero_denominator() {
        assert_eq!(
            "1/0".parse::<Percentage>(),
            Err(ArithmeticError::DivisionByZero("percentage denominator"))
        );
    }
}
