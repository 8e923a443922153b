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

use crate::{Amount, Epoch, PublicKey, SafeRatio, Slot};

/// One epoch's staking ledger, identified by the hash the chain assigns it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StakingLedger {
    pub id: String,
    pub epoch: Epoch,
    pub total_staked: Amount,
}

/// Vesting schedule of a timed account. Amounts unlock at `cliff_slot` and
/// then by `vesting_increment` every `vesting_period` slots.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    pub initial_minimum_balance: Amount,
    pub cliff_slot: Slot,
    pub cliff_amount: Amount,
    pub vesting_period: Slot,
    pub vesting_increment: Amount,
}

/// A single delegation entry of a staking ledger.
///
/// `weight` is scratch state for one distribution run: the weight pass fills
/// it in, the split pass reads it, and it is never written back to the store.
#[derive(Clone, Debug, PartialEq)]
pub struct StakingRecord {
    pub public_key: PublicKey,
    pub delegate: PublicKey,
    pub balance: Amount,
    pub timing: Option<Timing>,
    pub weight: Option<SafeRatio>,
}

impl StakingRecord {
    pub fn new(public_key: impl Into<PublicKey>, delegate: impl Into<PublicKey>, balance: Amount) -> Self {
        StakingRecord {
            public_key: public_key.into(),
            delegate: delegate.into(),
            balance,
            timing: None,
            weight: None,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn is_untimed(&self) -> bool {
        self.timing.is_none()
    }
}
