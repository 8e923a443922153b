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
    Block, BlockReward, Epoch, Percentage, PublicKey, StakingLedger, StakingRecord, ValidatorEpoch,
};
use boitata_ledger::store::{Store, StoreError};
use std::{cell::RefCell, collections::BTreeMap};

/// A `BTreeMap`-backed [`Store`], for tests and small deployments.
///
/// Lookups return [`StoreError::NotFound`] for anything that wasn't seeded.
/// Imports append to an inspectable log, one entry per batch, so tests can
/// assert both contents and import order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    validator_epochs: BTreeMap<(Epoch, PublicKey), ValidatorEpoch>,
    ledgers: BTreeMap<Epoch, StakingLedger>,
    records: BTreeMap<String, Vec<StakingRecord>>,
    first_blocks: BTreeMap<Epoch, Block>,
    imports: RefCell<Vec<Vec<BlockReward>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_validator_epoch(&mut self, validator_epoch: ValidatorEpoch) {
        self.validator_epochs.insert(
            (validator_epoch.epoch, validator_epoch.validator.clone()),
            validator_epoch,
        );
    }

    pub fn insert_ledger(&mut self, ledger: StakingLedger, records: Vec<StakingRecord>) {
        self.records.insert(ledger.id.clone(), records);
        self.ledgers.insert(ledger.epoch, ledger);
    }

    pub fn insert_first_block(&mut self, block: Block) {
        self.first_blocks.insert(block.epoch, block);
    }

    /// Imported batches, in import order.
    pub fn import_batches(&self) -> Vec<Vec<BlockReward>> {
        self.imports.borrow().clone()
    }

    /// All imported rewards, flattened across batches.
    pub fn imported_rewards(&self) -> Vec<BlockReward> {
        self.imports.borrow().iter().flatten().cloned().collect()
    }
}

impl Store for MemoryStore {
    fn validator_fee(&self, epoch: Epoch, validator: &PublicKey) -> Result<Percentage, StoreError> {
        self.validator_epochs
            .get(&(epoch, validator.clone()))
            .map(|validator_epoch| validator_epoch.fee.clone())
            .ok_or(StoreError::NotFound)
    }

    fn staking_ledger(&self, epoch: Epoch) -> Result<StakingLedger, StoreError> {
        self.ledgers.get(&epoch).cloned().ok_or(StoreError::NotFound)
    }

    fn staking_records(&self, ledger_id: &str) -> Result<Vec<StakingRecord>, StoreError> {
        self.records
            .get(ledger_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn first_block_of_epoch(&self, epoch: Epoch) -> Result<Block, StoreError> {
        self.first_blocks
            .get(&epoch)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn import_rewards(&self, rewards: &[BlockReward]) -> Result<(), StoreError> {
        self.imports.borrow_mut().push(rewards.to_vec());
        Ok(())
    }
}
