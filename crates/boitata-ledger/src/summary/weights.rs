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
    Amount, ArithmeticError, SafeRatio, Slot, StakingLedger, StakingRecord, Timing,
    SLOTS_PER_EPOCH,
};
use num::{
    traits::{One, Zero},
    BigInt, Integer,
};

/// How stake translates into weights for one distribution run.
///
/// Selected once by the orchestrator from `block.supercharged`, so the two
/// branches cannot drift apart across call sites.
#[derive(Clone, Debug)]
pub enum WeightPolicy {
    /// weight = balance / total staked.
    Proportional,

    /// Stake is scaled by a supercharge multiplier before normalization.
    Supercharged {
        /// Block-level factor produced by a
        /// [`super::SuperchargedWeighting`] policy.
        weighting: SafeRatio,
        /// Slot of the epoch's first block, anchoring the vesting window.
        first_slot: Slot,
    },
}

/// A record's fractional share of the total staked amount.
pub fn weight(balance: &Amount, total_staked: &Amount) -> Result<SafeRatio, ArithmeticError> {
    if total_staked.is_zero() {
        return Err(ArithmeticError::DivisionByZero("total staked amount"));
    }
    Ok(balance.as_ratio() / total_staked.as_ratio())
}

/// Populate the weight of every record, in place.
///
/// All-or-nothing: weights are computed for the full set before any record
/// is touched, so a failure never leaves a partially weighted set behind for
/// the split step to trip over. Under either policy the resulting weights
/// sum to exactly 1.
pub fn assign_weights(
    policy: &WeightPolicy,
    ledger: &StakingLedger,
    records: &mut [StakingRecord],
) -> Result<(), ArithmeticError> {
    // An empty ledger has nothing to weigh under either policy; in
    // particular it must not trip the supercharged normalization.
    if records.is_empty() {
        return Ok(());
    }

    let weights = match policy {
        WeightPolicy::Proportional => records
            .iter()
            .map(|record| weight(&record.balance, &ledger.total_staked))
            .collect::<Result<Vec<_>, _>>()?,

        WeightPolicy::Supercharged {
            weighting,
            first_slot,
        } => {
            if ledger.total_staked.is_zero() {
                return Err(ArithmeticError::DivisionByZero("total staked amount"));
            }

            let scaled = records
                .iter()
                .map(|record| supercharged_stake(record, weighting, *first_slot))
                .collect::<Vec<_>>();

            let total = scaled
                .iter()
                .fold(SafeRatio::zero(), |total, stake| total + stake);
            if total.is_zero() {
                return Err(ArithmeticError::DivisionByZero("supercharged stake total"));
            }

            scaled.into_iter().map(|stake| stake / &total).collect()
        }
    };

    for (record, weight) in records.iter_mut().zip(weights) {
        record.weight = Some(weight);
    }

    Ok(())
}

/// A record's stake scaled by its supercharge multiplier:
/// `balance × (1 + (weighting − 1) × timed)`. Untimed accounts get the full
/// multiplier; accounts still vesting get proportionally less.
fn supercharged_stake(record: &StakingRecord, weighting: &SafeRatio, first_slot: Slot) -> SafeRatio {
    let timed = timed_weighting(record.timing.as_ref(), first_slot);
    let multiplier = SafeRatio::one() + (weighting - SafeRatio::one()) * timed;
    record.balance.as_ratio() * multiplier
}

/// Fraction of the epoch during which a record's stake is unlocked.
///
/// 1 for untimed accounts; 0 when the schedule only completes after the
/// epoch; otherwise the unlocked tail of the epoch. Monotone: a later
/// vesting end never yields a larger weighting.
fn timed_weighting(timing: Option<&Timing>, first_slot: Slot) -> SafeRatio {
    let Some(timing) = timing else {
        return SafeRatio::one();
    };

    let end = vesting_end_slot(timing);
    let first = BigInt::from(first_slot);
    let epoch_end = &first + BigInt::from(SLOTS_PER_EPOCH);

    if end <= first {
        SafeRatio::one()
    } else if end >= epoch_end {
        SafeRatio::zero()
    } else {
        SafeRatio::new(epoch_end - end, BigInt::from(SLOTS_PER_EPOCH))
    }
}

/// Slot at which a timed account becomes fully unlocked: the cliff, plus one
/// vesting period per increment still owed after the cliff amount.
fn vesting_end_slot(timing: &Timing) -> BigInt {
    let cliff = BigInt::from(timing.cliff_slot);

    if timing.vesting_increment.is_zero() {
        return cliff;
    }

    let remaining = &timing.initial_minimum_balance - &timing.cliff_amount;
    if remaining <= Amount::zero() {
        return cliff;
    }

    let periods = remaining
        .as_bigint()
        .div_ceil(timing.vesting_increment.as_bigint());

    cliff + periods * BigInt::from(timing.vesting_period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boitata_kernel::safe_ratio;
    use proptest::{collection, prelude::*};

    fn ledger(total: u64) -> StakingLedger {
        StakingLedger {
            id: "jx7buQ".to_string(),
            epoch: 4,
            total_staked: Amount::from(total),
        }
    }

    fn records(balances: &[(&str, u64)]) -> Vec<StakingRecord> {
        balances
            .iter()
            .map(|(key, balance)| StakingRecord::new(*key, "B62qvalidator", Amount::from(*balance)))
            .collect()
    }

    #[test]
    fn proportional_weights_are_stake_shares() {
        let mut records = records(&[("B62qa", 600), ("B62qb", 400)]);

        assign_weights(&WeightPolicy::Proportional, &ledger(1000), &mut records)
            .expect("weighting succeeds");

        assert_eq!(records[0].weight, Some(safe_ratio(3, 5)));
        assert_eq!(records[1].weight, Some(safe_ratio(2, 5)));
    }

    #[test]
    fn zero_total_stake_fails_for_every_record() {
        for balance in [0u64, 1, 600] {
            assert_eq!(
                weight(&Amount::from(balance), &Amount::zero()),
                Err(ArithmeticError::DivisionByZero("total staked amount"))
            );
        }

        let mut records = records(&[("B62qa", 600)]);
        assert_eq!(
            assign_weights(&WeightPolicy::Proportional, &ledger(0), &mut records),
            Err(ArithmeticError::DivisionByZero("total staked amount"))
        );
        assert_eq!(records[0].weight, None);
    }

    #[test]
    fn empty_record_set_is_a_no_op_under_either_policy() {
        let mut records = records(&[]);

        assign_weights(&WeightPolicy::Proportional, &ledger(1000), &mut records)
            .expect("weighting succeeds");
        assign_weights(
            &WeightPolicy::Supercharged {
                weighting: safe_ratio(2, 1),
                first_slot: 0,
            },
            &ledger(1000),
            &mut records,
        )
        .expect("weighting succeeds");

        assert!(records.is_empty());
    }

    #[test]
    fn supercharged_all_untimed_reduces_to_proportional() {
        // A uniform multiplier cancels out in the normalization.
        let mut proportional = records(&[("B62qa", 600), ("B62qb", 400)]);
        let mut supercharged = proportional.clone();

        assign_weights(&WeightPolicy::Proportional, &ledger(1000), &mut proportional)
            .expect("weighting succeeds");
        assign_weights(
            &WeightPolicy::Supercharged {
                weighting: safe_ratio(2, 1),
                first_slot: 0,
            },
            &ledger(1000),
            &mut supercharged,
        )
        .expect("weighting succeeds");

        for (left, right) in proportional.iter().zip(&supercharged) {
            assert_eq!(left.weight, right.weight);
        }
    }

    #[test]
    fn supercharged_shifts_weight_away_from_locked_stake() {
        let locked = Timing {
            initial_minimum_balance: Amount::from(500u64),
            cliff_slot: 100_000,
            cliff_amount: Amount::from(500u64),
            vesting_period: 0,
            vesting_increment: Amount::zero(),
        };

        // Equal balances; "a" is untimed, "b" stays locked for the whole
        // epoch. With weighting = 2, "a" counts double: 1000/1500 vs 500/1500.
        let mut records = records(&[("B62qa", 500), ("B62qb", 500)]);
        records[1] = records[1].clone().with_timing(locked);

        assign_weights(
            &WeightPolicy::Supercharged {
                weighting: safe_ratio(2, 1),
                first_slot: 0,
            },
            &ledger(1000),
            &mut records,
        )
        .expect("weighting succeeds");

        assert_eq!(records[0].weight, Some(safe_ratio(2, 3)));
        assert_eq!(records[1].weight, Some(safe_ratio(1, 3)));
    }

    #[test]
    fn timed_weighting_tracks_the_vesting_end() {
        let timing = |cliff_slot| Timing {
            initial_minimum_balance: Amount::from(1000u64),
            cliff_slot,
            cliff_amount: Amount::from(1000u64),
            vesting_period: 0,
            vesting_increment: Amount::zero(),
        };

        // Unlocked before the epoch starts.
        assert_eq!(
            timed_weighting(Some(&timing(5000)), 10_000),
            SafeRatio::one()
        );
        // Unlocks exactly halfway through the epoch.
        assert_eq!(
            timed_weighting(Some(&timing(10_000 + SLOTS_PER_EPOCH / 2)), 10_000),
            safe_ratio(1, 2)
        );
        // Still locked at the end of the epoch.
        assert_eq!(
            timed_weighting(Some(&timing(10_000 + SLOTS_PER_EPOCH)), 10_000),
            SafeRatio::zero()
        );
        // Untimed accounts always weigh in full.
        assert_eq!(timed_weighting(None, 10_000), SafeRatio::one());
    }

    #[test]
    fn vesting_end_accounts_for_remaining_increments() {
        let timing = Timing {
            initial_minimum_balance: Amount::from(1000u64),
            cliff_slot: 200,
            cliff_amount: Amount::from(400u64),
            vesting_period: 10,
            vesting_increment: Amount::from(100u64),
        };

        // 600 still owed after the cliff, 100 per 10 slots: 6 periods.
        assert_eq!(vesting_end_slot(&timing), BigInt::from(260));

        // A partial last increment still takes a full period.
        let uneven = Timing {
            vesting_increment: Amount::from(250u64),
            ..timing
        };
        assert_eq!(vesting_end_slot(&uneven), BigInt::from(230));
    }

    proptest! {
        #[test]
        fn prop_weights_sum_to_one(balances in collection::vec(1u64..=1_000_000_000, 1..50)) {
            let total = balances.iter().sum::<u64>();
            let mut records = balances
                .iter()
                .enumerate()
                .map(|(i, balance)| {
                    StakingRecord::new(format!("B62q{i}").as_str(), "B62qvalidator", Amount::from(*balance))
                })
                .collect::<Vec<_>>();

            assign_weights(&WeightPolicy::Proportional, &ledger(total), &mut records)
                .expect("weighting succeeds");

            let sum = records
                .iter()
                .fold(SafeRatio::zero(), |sum, record| {
                    sum + record.weight.clone().expect("assigned")
                });
            prop_assert_eq!(sum, SafeRatio::one());
        }
    }

    proptest! {
        #[test]
        fn prop_supercharged_weights_sum_to_one(
            balances in collection::vec(1u64..=1_000_000_000, 1..50),
            weighting in (1u64..=4, 1u64..=4),
        ) {
            let total = balances.iter().sum::<u64>();
            let mut records = balances
                .iter()
                .enumerate()
                .map(|(i, balance)| {
                    StakingRecord::new(format!("B62q{i}").as_str(), "B62qvalidator", Amount::from(*balance))
                })
                .collect::<Vec<_>>();

            let policy = WeightPolicy::Supercharged {
                weighting: SafeRatio::one() + safe_ratio(weighting.0, weighting.1),
                first_slot: 0,
            };
            assign_weights(&policy, &ledger(total), &mut records)
                .expect("weighting succeeds");

            let sum = records
                .iter()
                .fold(SafeRatio::zero(), |sum, record| {
                    sum + record.weight.clone().expect("assigned")
                });
            prop_assert_eq!(sum, SafeRatio::one());
        }
    }
}
