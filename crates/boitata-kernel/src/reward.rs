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

use crate::{Amount, Epoch, Height, Percentage, PublicKey};

/// Which side of the split a reward belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Validator,
    Delegator,
}

/// A computed reward for one account at one block height.
///
/// Built once per distribution run, handed to the store for import, and
/// never mutated afterwards. Idempotent upsert is the store's concern.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlockReward {
    pub owner: PublicKey,
    pub height: Height,
    pub epoch: Epoch,
    pub kind: RewardKind,
    pub reward: Amount,
}

/// The fee a validator declared for a given epoch. Exactly one such record
/// must exist per (epoch, validator) before rewards can be distributed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidatorEpoch {
    pub epoch: Epoch,
    pub validator: PublicKey,
    pub fee: Percentage,
}
