//! Property-based tests for debt simplification.
//!
//! - Applying the suggested transfers settles every balance
//! - Simplifying again afterwards suggests nothing
//! - At most one transfer fewer than the number of non-settled participants

use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::money::is_settled;
use splitledger_shared::types::UserId;

use super::simplifier::{DebtSimplifier, Transaction};
use crate::balance::{BalanceCalculator, BalanceMap};

/// Strategy for a zero-sum balance map with cent-precision balances.
fn zero_sum_balances() -> impl Strategy<Value = BalanceMap> {
    prop::collection::vec(-1_000_000i64..1_000_000i64, 1..12).prop_map(|cents| {
        let mut map: BalanceMap = cents
            .iter()
            .enumerate()
            .map(|(index, c)| (user(index), Decimal::new(*c, 2)))
            .collect();
        let closing = -map.net_total();
        map.credit(user(cents.len()), closing);
        map
    })
}

fn user(index: usize) -> UserId {
    UserId(i64::try_from(index).unwrap_or(i64::MAX) + 1)
}

fn apply(balances: &BalanceMap, transactions: &[Transaction]) -> BalanceMap {
    let mut after = balances.clone();
    for transaction in transactions {
        BalanceCalculator::apply_settlement(&mut after, &transaction.to_completed_settlement());
    }
    after
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* zero-sum balance map, applying the suggested transfers as
    /// completed settlements SHALL leave every balance settled.
    #[test]
    fn prop_transfers_settle_everyone(balances in zero_sum_balances()) {
        let transactions = DebtSimplifier::simplify(&balances);
        let after = apply(&balances, &transactions);

        for (user, balance) in after.iter() {
            prop_assert!(is_settled(balance), "{} left at {}", user, balance);
        }
    }

    /// *For any* zero-sum balance map, simplification SHALL be idempotent
    /// once its own transfers are recorded.
    #[test]
    fn prop_simplify_is_idempotent(balances in zero_sum_balances()) {
        let transactions = DebtSimplifier::simplify(&balances);
        let after = apply(&balances, &transactions);
        prop_assert!(DebtSimplifier::simplify(&after).is_empty());
    }

    /// *For any* balance map, every transfer SHALL be positive, between two
    /// different participants, and the count SHALL stay below the number of
    /// unsettled participants.
    #[test]
    fn prop_transfer_shape(balances in zero_sum_balances()) {
        let transactions = DebtSimplifier::simplify(&balances);
        let unsettled = balances.iter().filter(|(_, b)| !is_settled(*b)).count();

        prop_assert!(transactions.len() <= unsettled.saturating_sub(1));
        for t in &transactions {
            prop_assert!(t.amount > Decimal::ZERO);
            prop_assert_ne!(t.from, t.to);
            prop_assert!(balances.get(t.from) < Decimal::ZERO);
            prop_assert!(balances.get(t.to) > Decimal::ZERO);
        }
    }
}
