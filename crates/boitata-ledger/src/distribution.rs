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

use crate::{
    store::{Store, StoreError},
    summary::{
        assign_weights, delegator_reward, validator_reward, RewardsSummary, SuperchargedWeighting,
        WeightPolicy,
    },
};
use boitata_kernel::{
    ArithmeticError, Block, BlockReward, Epoch, PublicKey, RewardKind, SafeRatio,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, instrument, Level};

const EVENT_TARGET: &str = "boitata::ledger::distribution";

#[derive(Debug, Error)]
pub enum DistributionError {
    /// A block exists for this epoch, so a fee must have been declared.
    #[error("validator fee for epoch {epoch} not found ({validator})")]
    MissingValidatorFee { epoch: Epoch, validator: PublicKey },

    /// Required by the supercharged policy to anchor vesting windows.
    #[error("first block of epoch {0} not found")]
    MissingFirstBlock(Epoch),

    /// A record surfaced during splitting without a weight. This is a
    /// consistency bug in the engine, not bad user data.
    #[error("no weight computed for {0}")]
    MissingWeight(PublicKey),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    Store(StoreError),
}

/// Why a run ended without distributing anything. Both cases are clean
/// exits: retry once the missing data has been ingested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferral {
    /// Coinbase, transaction fees or snark-job fees not ingested yet.
    MissingRewardComponents,
    /// The epoch's staking ledger has not been indexed yet.
    MissingStakingLedger,
}

/// Result of one block's distribution run.
#[derive(Debug)]
pub enum Outcome {
    /// Rewards were computed and imported.
    Applied(RewardsSummary),
    /// Upstream data is missing; nothing was written.
    Deferred(Deferral),
}

/// Distribute one block's reward between its creator and the delegating
/// stakers of the epoch's ledger.
///
/// Runs the whole computation over an in-memory snapshot and only touches
/// the store at the very end: a failure anywhere aborts the run with no
/// partial persistence. Weight state lives and dies inside this call.
#[instrument(level = Level::TRACE, skip_all, fields(height = block.height, epoch = block.epoch))]
pub fn run_reward_calculation(
    store: &impl Store,
    block: &Block,
    supercharged: &impl SuperchargedWeighting,
) -> Result<Outcome, DistributionError> {
    // Reward components may lag the block itself; nothing to do yet.
    let Some(block_reward) = block.reward() else {
        return Ok(Outcome::Deferred(Deferral::MissingRewardComponents));
    };

    // A missing fee is a configuration error, not a lag: no downstream split
    // is meaningful without it.
    let fee = match store.validator_fee(block.epoch, &block.creator) {
        Ok(fee) => fee,
        Err(StoreError::NotFound) => {
            return Err(DistributionError::MissingValidatorFee {
                epoch: block.epoch,
                validator: block.creator.clone(),
            })
        }
        Err(err) => return Err(DistributionError::Store(err)),
    };

    // The ledger, on the other hand, may simply not be ingested yet.
    let ledger = match store.staking_ledger(block.epoch) {
        Ok(ledger) => ledger,
        Err(StoreError::NotFound) => {
            return Ok(Outcome::Deferred(Deferral::MissingStakingLedger))
        }
        Err(err) => return Err(DistributionError::Store(err)),
    };

    let mut records = match store.staking_records(&ledger.id) {
        Ok(records) => records,
        Err(StoreError::NotFound) => Vec::new(),
        Err(err) => return Err(DistributionError::Store(err)),
    };

    // The epoch's first block is only needed to anchor the supercharged
    // vesting window; its absence is tolerated otherwise.
    let policy = if block.supercharged {
        let weighting = supercharged.weighting(block)?;
        let first_block = match store.first_block_of_epoch(block.epoch) {
            Ok(first_block) => first_block,
            Err(StoreError::NotFound) => {
                return Err(DistributionError::MissingFirstBlock(block.epoch))
            }
            Err(err) => return Err(DistributionError::Store(err)),
        };
        WeightPolicy::Supercharged {
            weighting,
            first_slot: first_block.slot,
        }
    } else {
        WeightPolicy::Proportional
    };

    assign_weights(&policy, &ledger, &mut records)?;

    // One owned, read-only mapping for the split pass; weights never leave
    // this run.
    let weights = records
        .iter()
        .filter_map(|record| {
            record
                .weight
                .clone()
                .map(|weight| (record.public_key.clone(), weight))
        })
        .collect::<BTreeMap<PublicKey, SafeRatio>>();

    let delegators = records
        .iter()
        .map(|record| {
            let weight = weights
                .get(&record.public_key)
                .ok_or_else(|| DistributionError::MissingWeight(record.public_key.clone()))?;

            Ok(BlockReward {
                owner: record.public_key.clone(),
                height: block.height,
                epoch: block.epoch,
                kind: RewardKind::Delegator,
                reward: delegator_reward(weight, &block_reward, &fee),
            })
        })
        .collect::<Result<Vec<_>, DistributionError>>()?;

    let validator = BlockReward {
        owner: block.creator.clone(),
        height: block.height,
        epoch: block.epoch,
        kind: RewardKind::Validator,
        reward: validator_reward(&block_reward, &fee),
    };

    // Delegators first, then the validator. Import failures propagate
    // unchanged; retrying is the caller's decision.
    store
        .import_rewards(&delegators)
        .map_err(DistributionError::Store)?;
    store
        .import_rewards(std::slice::from_ref(&validator))
        .map_err(DistributionError::Store)?;

    info!(
        target: EVENT_TARGET,
        height = block.height,
        epoch = block.epoch,
        %block_reward,
        validator_reward = %validator.reward,
        delegators = delegators.len(),
        "rewards.applied"
    );

    Ok(Outcome::Applied(RewardsSummary {
        epoch: block.epoch,
        height: block.height,
        block_reward,
        fee,
        validator,
        delegators,
    }))
}
