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

pub mod amount;
pub mod block;
pub mod percentage;
pub mod public_key;
pub mod ratio;
pub mod reward;
pub mod staking;

pub use amount::Amount;
pub use block::Block;
pub use percentage::Percentage;
pub use public_key::PublicKey;
pub use ratio::{floor_to_amount, parse_decimal, safe_ratio, ArithmeticError, SafeRatio};
pub use reward::{BlockReward, RewardKind, ValidatorEpoch};
pub use staking::{StakingLedger, StakingRecord, Timing};

pub type Epoch = u64;

pub type Slot = u64;

pub type Height = u64;

/// Number of slots in one epoch.
pub const SLOTS_PER_EPOCH: u64 = 7140;
