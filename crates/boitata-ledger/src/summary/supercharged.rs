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

use boitata_kernel::{ArithmeticError, Block, SafeRatio};
use num::traits::One;

/// Block-level supercharge factor.
///
/// The exact formula is domain policy rather than engine arithmetic, so it
/// stays behind a trait. Implementations must return a factor ≥ 1 (1 meaning
/// "no boost") and fail when block fields they need are absent; they must
/// never substitute defaults for missing data.
pub trait SuperchargedWeighting {
    fn weighting(&self, block: &Block) -> Result<SafeRatio, ArithmeticError>;
}

/// The production policy: `1 + 1 / (1 + transaction fees / coinbase)`.
///
/// A fee-less block gets the maximal factor of 2; the factor decays toward 1
/// as fees come to dominate the coinbase.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeeWeighting;

impl SuperchargedWeighting for FeeWeighting {
    fn weighting(&self, block: &Block) -> Result<SafeRatio, ArithmeticError> {
        let coinbase = block
            .coinbase
            .as_ref()
            .ok_or(ArithmeticError::MissingBlockField("coinbase"))?;
        let transactions_fees = block
            .transactions_fees
            .as_ref()
            .ok_or(ArithmeticError::MissingBlockField("transactions fees"))?;

        if coinbase.is_zero() {
            return Err(ArithmeticError::DivisionByZero("coinbase"));
        }

        let fees_ratio = transactions_fees.as_ratio() / coinbase.as_ratio();

        Ok(SafeRatio::one() + SafeRatio::one() / (SafeRatio::one() + fees_ratio))
    }
}
