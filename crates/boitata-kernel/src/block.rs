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

use crate::{Amount, Epoch, Height, PublicKey, Slot};

/// A finalized block, as mapped from the archive node.
///
/// The three reward components are optional because the ingestion pipeline
/// may index a block before its fee tallies are available; a distribution run
/// over such a block is deferred, not failed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub height: Height,
    pub epoch: Epoch,
    pub slot: Slot,
    pub creator: PublicKey,
    pub supercharged: bool,
    pub coinbase: Option<Amount>,
    pub transactions_fees: Option<Amount>,
    pub snark_jobs_fees: Option<Amount>,
}

impl Block {
    /// The total pool to be split between validator and delegators:
    /// coinbase + transaction fees − snark-job fees.
    ///
    /// `None` when any component hasn't been ingested yet. Zero components
    /// still go through the full sum; only absence short-circuits.
    pub fn reward(&self) -> Option<Amount> {
        match (&self.coinbase, &self.transactions_fees, &self.snark_jobs_fees) {
            (Some(coinbase), Some(transactions_fees), Some(snark_jobs_fees)) => {
                Some(&(coinbase + transactions_fees) - snark_jobs_fees)
            }
            _ => None,
        }
    }
}
