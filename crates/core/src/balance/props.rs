//! Property-based tests for balance calculation.
//!
//! - Zero-sum: balances of a closed group always sum to zero
//! - Pending settlements never move balances

use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::UserId;

use super::calculator::BalanceCalculator;
use crate::expense::Expense;
use crate::settlement::Settlement;
use crate::split::{SplitBuilder, SplitPolicy};

const GROUP_SIZE: i64 = 6;

/// Strategy to generate an equal-split expense among a random subset of the group.
fn expense_strategy() -> impl Strategy<Value = Expense> {
    (
        1i64..=GROUP_SIZE,
        1i64..10_000_000i64,
        prop::collection::btree_set(1i64..=GROUP_SIZE, 1..=6),
    )
        .prop_map(|(payer, cents, members)| {
            let participants: Vec<UserId> = members.into_iter().map(UserId).collect();
            Expense::create(
                &SplitBuilder::default(),
                UserId(payer),
                SplitPolicy::Equal,
                Decimal::new(cents, 2),
                &participants,
                None,
            )
            .unwrap()
        })
}

/// Strategy to generate a settlement between two distinct members.
fn settlement_strategy() -> impl Strategy<Value = Settlement> {
    (1i64..=GROUP_SIZE, 1i64..GROUP_SIZE, 1i64..1_000_000i64, any::<bool>()).prop_map(
        |(from, offset, cents, completed)| {
            let to = (from - 1 + offset) % GROUP_SIZE + 1;
            let amount = Decimal::new(cents, 2);
            if completed {
                Settlement::completed(UserId(from), UserId(to), amount)
            } else {
                Settlement::pending(UserId(from), UserId(to), amount)
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* set of balanced expenses and settlements, the balances SHALL
    /// sum to exactly zero.
    #[test]
    fn prop_balances_sum_to_zero(
        expenses in prop::collection::vec(expense_strategy(), 0..20),
        settlements in prop::collection::vec(settlement_strategy(), 0..20),
    ) {
        let balances = BalanceCalculator::calculate(&expenses, &settlements);
        prop_assert_eq!(balances.net_total(), Decimal::ZERO);
    }

    /// *For any* history, adding pending settlements SHALL NOT change any balance.
    #[test]
    fn prop_pending_settlements_are_inert(
        expenses in prop::collection::vec(expense_strategy(), 1..10),
        settlements in prop::collection::vec(settlement_strategy(), 0..10),
    ) {
        let completed: Vec<Settlement> = settlements
            .iter()
            .filter(|s| s.is_completed())
            .cloned()
            .collect();

        let with_pending = BalanceCalculator::calculate(&expenses, &settlements);
        let without_pending = BalanceCalculator::calculate(&expenses, &completed);

        for user in with_pending.participants() {
            prop_assert_eq!(with_pending.get(user), without_pending.get(user));
        }
    }

    /// *For any* history, the result SHALL not depend on how the expenses are
    /// chunked across calls.
    #[test]
    fn prop_calculation_is_additive(
        first in prop::collection::vec(expense_strategy(), 0..8),
        second in prop::collection::vec(expense_strategy(), 0..8),
    ) {
        let mut all = first.clone();
        all.extend(second.iter().cloned());
        let combined = BalanceCalculator::calculate(&all, &[]);

        let mut stepwise = BalanceCalculator::calculate(&first, &[]);
        for expense in &second {
            BalanceCalculator::apply_expense(&mut stepwise, expense);
        }

        for user in combined.participants() {
            prop_assert_eq!(combined.get(user), stepwise.get(user));
        }
    }
}
