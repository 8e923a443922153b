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

use boitata_kernel::{
    floor_to_amount, Amount, BlockReward, Epoch, Height, Percentage, SafeRatio,
};

/// The validator's cut: `block reward × fee / 100`, floored to the native
/// unit.
pub fn validator_reward(block_reward: &Amount, fee: &Percentage) -> Amount {
    floor_to_amount(block_reward.as_ratio() * fee.as_fraction())
}

/// One delegator's cut: the non-fee remainder of the block reward, pro-rata
/// by weight: `block reward × (100 − fee) / 100 × weight`.
///
/// With Σ weight == 1, the validator cut and all delegator cuts rebuild the
/// block reward exactly before flooring, and up to one native unit per
/// record after it.
pub fn delegator_reward(weight: &SafeRatio, block_reward: &Amount, fee: &Percentage) -> Amount {
    floor_to_amount(block_reward.as_ratio() * fee.complement().as_fraction() * weight)
}

/// Everything one distribution run produced, for audit logging and tests.
/// Built once, never mutated; only the contained [`BlockReward`]s are
/// persisted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RewardsSummary {
    pub epoch: Epoch,
    pub height: Height,
    pub block_reward: Amount,
    pub fee: Percentage,
    pub validator: BlockReward,
    pub delegators: Vec<BlockReward>,
}

impl RewardsSummary {
    /// Total actually handed out, validator cut included. At most
    /// `delegators + 1` native units below the block reward, the difference
    /// being per-record flooring.
    pub fn total_distributed(&self) -> Amount {
        self.delegators
            .iter()
            .fold(self.validator.reward.clone(), |total, delegator| {
                &total + &delegator.reward
            })
    }
}
