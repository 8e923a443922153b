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

use crate::Amount;
use num::{rational::Ratio, BigInt};
use thiserror::Error;

/// Exact rational arithmetic, used for every fractional value in the engine:
/// weights, fee fractions and intermediate reward values. Rationals keep the
/// weight-sum and reward-conservation identities exact regardless of stake
/// magnitudes; nothing in the computation path ever goes through a float.
pub type SafeRatio = Ratio<BigInt>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// The input string is not a number. Distinct from zero, on purpose.
    #[error("unable to parse {what} from {value:?}")]
    Unparsable { what: &'static str, value: String },

    #[error("{0} cannot be zero")]
    DivisionByZero(&'static str),

    /// A block field required by the supercharged weighting formula hasn't
    /// been ingested (yet).
    #[error("block field required by supercharged weighting is absent: {0}")]
    MissingBlockField(&'static str),
}

pub fn safe_ratio(numerator: u64, denominator: u64) -> SafeRatio {
    SafeRatio::new(BigInt::from(numerator), BigInt::from(denominator))
}

/// Parse a decimal string (e.g. `"5"`, `"2.5"`, `"-0.125"`, `".5"`) into an
/// exact ratio, scaling the fractional part by the matching power of ten.
pub fn parse_decimal(what: &'static str, value: &str) -> Result<SafeRatio, ArithmeticError> {
    let unparsable = || ArithmeticError::Unparsable {
        what,
        value: value.to_string(),
    };

    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let (integral, fractional) = match digits.split_once('.') {
        Some(parts) => parts,
        None => (digits, ""),
    };

    if integral.is_empty() && fractional.is_empty() {
        return Err(unparsable());
    }

    if !integral.bytes().all(|b| b.is_ascii_digit())
        || !fractional.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(unparsable());
    }

    let unscaled = BigInt::parse_bytes(format!("{integral}{fractional}").as_bytes(), 10)
        .ok_or_else(unparsable)?;

    let numerator = if negative { -unscaled } else { unscaled };
    let denominator = (0..fractional.len()).fold(BigInt::from(1), |scale, _| scale * 10);

    Ok(SafeRatio::new(numerator, denominator))
}

/// Truncate a ratio down to a whole number of native units. This is the one
/// place where precision is given up, at the persistence boundary.
pub fn floor_to_amount(value: SafeRatio) -> Amount {
    Amount::from(value.floor().to_integer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("10", 10, 1; "integer")]
    #[test_case("2.5", 5, 2; "simple fraction")]
    #[test_case("0.125", 1, 8; "eighth")]
    #[test_case("-0.5", -1, 2; "negative")]
    #[test_case(".5", 1, 2; "no integral part")]
    #[test_case("5.", 5, 1; "no fractional part")]
    #[test_case("0", 0, 1; "zero")]
    fn parse_decimal_exact(input: &str, numerator: i64, denominator: i64) {
        assert_eq!(
            parse_decimal("value", input),
            Ok(SafeRatio::new(
                BigInt::from(numerator),
                BigInt::from(denominator)
            ))
        );
    }

    #[test_case(""; "empty")]
    #[test_case("."; "lone dot")]
    #[test_case("1..2"; "double dot")]
    #[test_case("12a"; "trailing garbage")]
    #[test_case("1 2"; "inner space")]
    #[test_case("NaN"; "not a number")]
    fn parse_decimal_rejects(input: &str) {
        assert_eq!(
            parse_decimal("value", input),
            Err(ArithmeticError::Unparsable {
                what: "value",
                value: input.to_string()
            })
        );
    }

    #[test_case(7, 2, "3"; "positive rounds down")]
    #[test_case(-7, 2, "-4"; "negative rounds toward minus infinity")]
    #[test_case(100, 1, "100"; "already whole")]
    fn floor_to_amount_truncates(numerator: i64, denominator: i64, expected: &str) {
        let floored = floor_to_amount(SafeRatio::new(
            BigInt::from(numerator),
            BigInt::from(denominator),
        ));
        assert_eq!(floored.to_string(), expected);
    }
}
