//! Net balance calculation.
//!
//! Folds a group's expense history and completed settlements into one signed
//! balance per participant. Arithmetic stays in exact decimals; nothing is
//! rounded here.

use splitledger_shared::types::UserId;
use tracing::debug;

use super::types::BalanceMap;
use crate::expense::Expense;
use crate::settlement::Settlement;

/// Stateless balance calculator.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Computes net balances from expenses and settlements.
    ///
    /// 1. Every expense credits its payer with the full total, then debits
    ///    each split participant with their share. A payer who is also in the
    ///    split ends up credited with the other participants' shares only.
    /// 2. Every COMPLETED settlement moves both parties toward zero: the
    ///    sender is credited and the receiver debited by the amount.
    ///    PENDING settlements are ignored.
    ///
    /// Split sums are not re-validated; an unbalanced expense shows up as a
    /// non-zero `net_total()`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use splitledger_core::balance::BalanceCalculator;
    /// use splitledger_core::expense::Expense;
    /// use splitledger_core::split::{SplitBuilder, SplitPolicy};
    /// use splitledger_shared::types::UserId;
    ///
    /// let dinner = Expense::create(
    ///     &SplitBuilder::default(),
    ///     UserId(1),
    ///     SplitPolicy::Equal,
    ///     dec!(30.00),
    ///     &[UserId(1), UserId(2), UserId(3)],
    ///     None,
    /// )
    /// .unwrap();
    ///
    /// let balances = BalanceCalculator::calculate(&[dinner], &[]);
    /// assert_eq!(balances.get(UserId(1)), dec!(20.00));
    /// assert_eq!(balances.get(UserId(2)), dec!(-10.00));
    /// ```
    #[must_use]
    pub fn calculate(expenses: &[Expense], settlements: &[Settlement]) -> BalanceMap {
        let mut balances = BalanceMap::new();
        Self::accumulate(&mut balances, expenses, settlements);
        balances
    }

    /// Like [`BalanceCalculator::calculate`], but every roster member is
    /// listed (at zero if untouched) ahead of anyone else who appears.
    #[must_use]
    pub fn calculate_with_roster(
        roster: &[UserId],
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> BalanceMap {
        let mut balances = BalanceMap::with_roster(roster.iter().copied());
        Self::accumulate(&mut balances, expenses, settlements);
        balances
    }

    /// Applies one expense to `balances`.
    pub fn apply_expense(balances: &mut BalanceMap, expense: &Expense) {
        balances.credit(expense.payer, expense.total_amount);
        for line in &expense.splits {
            balances.debit(line.participant, line.amount);
        }
    }

    /// Applies one settlement to `balances` if it is completed.
    pub fn apply_settlement(balances: &mut BalanceMap, settlement: &Settlement) {
        if !settlement.is_completed() {
            return;
        }
        balances.credit(settlement.from, settlement.amount);
        balances.debit(settlement.to, settlement.amount);
    }

    fn accumulate(balances: &mut BalanceMap, expenses: &[Expense], settlements: &[Settlement]) {
        for expense in expenses {
            Self::apply_expense(balances, expense);
        }

        let mut completed = 0usize;
        for settlement in settlements {
            if settlement.is_completed() {
                completed += 1;
            }
            Self::apply_settlement(balances, settlement);
        }

        debug!(
            expenses = expenses.len(),
            settlements = settlements.len(),
            completed_settlements = completed,
            participants = balances.len(),
            net_total = %balances.net_total(),
            "balances calculated"
        );
    }
}
