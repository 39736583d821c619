//! Property-based tests for split building.
//!
//! - Conservation: split lines always sum to the expense total
//! - Equal shares differ by the first participant's leftover cents only

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use splitledger_shared::PercentageRounding;
use splitledger_shared::types::UserId;

use super::builder::SplitBuilder;
use super::types::{SplitPolicy, SplitValue};

/// Strategy to generate positive totals (0.01 to 1,000,000.00).
fn positive_total() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a participant list of 1 to 20 distinct users.
fn participant_list() -> impl Strategy<Value = Vec<UserId>> {
    (1usize..=20).prop_map(|n| (1..=n).map(|i| UserId(i64::try_from(i).unwrap_or(0))).collect())
}

/// Strategy to generate percentages (2 dp) that sum to exactly 100.
fn percentages_summing_to_100() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..100, 1..10).prop_map(|weights| {
        let sum: u32 = weights.iter().sum();
        let hundred = Decimal::from(100);
        let mut pcts: Vec<Decimal> = weights
            .iter()
            .map(|w| {
                (hundred * Decimal::from(*w) / Decimal::from(sum))
                    .round_dp_with_strategy(2, RoundingStrategy::ToZero)
            })
            .collect();
        let drift = hundred - pcts.iter().copied().sum::<Decimal>();
        pcts[0] += drift;
        pcts
    })
}

/// Strategy to generate cent amounts that are then used as an exact split.
fn exact_amounts() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(0i64..1_000_000i64, 1..10)
        .prop_filter("total must be positive", |cents| cents.iter().sum::<i64>() > 0)
        .prop_map(|cents| cents.into_iter().map(|c| Decimal::new(c, 2)).collect())
}

fn users(n: usize) -> Vec<UserId> {
    (1..=n).map(|i| UserId(i64::try_from(i).unwrap_or(0))).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* positive total and participant count, an EQUAL split SHALL
    /// sum exactly to the total.
    #[test]
    fn prop_equal_split_conserves_total(
        total in positive_total(),
        participants in participant_list(),
    ) {
        let lines = SplitBuilder::default()
            .build(SplitPolicy::Equal, total, &participants, None)
            .unwrap();
        prop_assert_eq!(lines.iter().map(|l| l.amount).sum::<Decimal>(), total);
    }

    /// *For any* EQUAL split, every participant after the first SHALL owe the
    /// same floored share, and the first SHALL owe at most (n-1) cents more.
    #[test]
    fn prop_equal_split_shape(
        total in positive_total(),
        participants in participant_list(),
    ) {
        let lines = SplitBuilder::default()
            .build(SplitPolicy::Equal, total, &participants, None)
            .unwrap();
        let share = lines.last().unwrap().amount;
        prop_assert!(lines[1..].iter().all(|l| l.amount == share));

        let extra = lines[0].amount - share;
        let max_extra = Decimal::new(i64::try_from(participants.len() - 1).unwrap_or(0), 2);
        prop_assert!(extra >= Decimal::ZERO);
        prop_assert!(extra <= max_extra, "extra {} exceeds {}", extra, max_extra);
    }

    /// *For any* exact amounts, an EXACT split of their sum SHALL reproduce
    /// them unchanged.
    #[test]
    fn prop_exact_split_conserves_total(amounts in exact_amounts()) {
        let participants = users(amounts.len());
        let total: Decimal = amounts.iter().copied().sum();
        let values: Vec<SplitValue> = participants
            .iter()
            .zip(&amounts)
            .map(|(p, a)| SplitValue::new(*p, *a))
            .collect();

        let lines = SplitBuilder::default()
            .build(SplitPolicy::Exact, total, &participants, Some(&values))
            .unwrap();
        prop_assert_eq!(lines.iter().map(|l| l.amount).collect::<Vec<_>>(), amounts);
        prop_assert_eq!(lines.iter().map(|l| l.amount).sum::<Decimal>(), total);
    }

    /// *For any* percentages summing to 100, a PERCENTAGE split with Largest
    /// Remainder rounding SHALL sum exactly to the total.
    #[test]
    fn prop_percentage_split_conserves_total(
        total in positive_total(),
        percentages in percentages_summing_to_100(),
    ) {
        let participants = users(percentages.len());
        let values: Vec<SplitValue> = participants
            .iter()
            .zip(&percentages)
            .map(|(p, pct)| SplitValue::new(*p, *pct))
            .collect();

        let lines = SplitBuilder::new(PercentageRounding::LargestRemainder)
            .build(SplitPolicy::Percentage, total, &participants, Some(&values))
            .unwrap();
        prop_assert_eq!(lines.iter().map(|l| l.amount).sum::<Decimal>(), total);
        prop_assert!(lines.iter().all(|l| l.amount >= Decimal::ZERO));
    }

    /// *For any* percentages summing to 100, per-line rounding SHALL drift
    /// from the total by at most half a cent per participant.
    #[test]
    fn prop_percentage_preserve_drift_is_bounded(
        total in positive_total(),
        percentages in percentages_summing_to_100(),
    ) {
        let participants = users(percentages.len());
        let values: Vec<SplitValue> = participants
            .iter()
            .zip(&percentages)
            .map(|(p, pct)| SplitValue::new(*p, *pct))
            .collect();

        let lines = SplitBuilder::new(PercentageRounding::Preserve)
            .build(SplitPolicy::Percentage, total, &participants, Some(&values))
            .unwrap();
        let drift = (lines.iter().map(|l| l.amount).sum::<Decimal>() - total).abs();
        let bound = Decimal::new(5, 3) * Decimal::from(participants.len());
        prop_assert!(drift <= bound, "drift {} exceeds {}", drift, bound);
    }
}
