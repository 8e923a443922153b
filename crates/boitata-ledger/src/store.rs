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

use boitata_kernel::{Block, BlockReward, Epoch, Percentage, PublicKey, StakingLedger, StakingRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row does not exist. Interpreted per call site: some
    /// lookups read it as "not yet ingested" (the run is deferred), others
    /// as a configuration error (the run hard-fails).
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Access to the indexed chain data a distribution run needs. One run
/// performs four lookups and two imports; everything else about the backing
/// database (schema, transport, retries) lives behind this trait.
///
/// All calls are ordinary synchronous calls with no internal timeout;
/// deadlines, if needed, wrap the whole run on the caller's side.
pub trait Store {
    /// The fee a validator declared for an epoch.
    fn validator_fee(&self, epoch: Epoch, validator: &PublicKey) -> Result<Percentage, StoreError>;

    /// The staking ledger applicable to an epoch.
    fn staking_ledger(&self, epoch: Epoch) -> Result<StakingLedger, StoreError>;

    /// All delegation entries of a ledger, in stable order.
    fn staking_records(&self, ledger_id: &str) -> Result<Vec<StakingRecord>, StoreError>;

    /// The first block produced in an epoch; its slot anchors the vesting
    /// window of the supercharged weighting.
    fn first_block_of_epoch(&self, epoch: Epoch) -> Result<Block, StoreError>;

    /// Persist a batch of computed rewards. Idempotency (upsert on conflict)
    /// is the store's responsibility, not the engine's.
    fn import_rewards(&self, rewards: &[BlockReward]) -> Result<(), StoreError>;
}
