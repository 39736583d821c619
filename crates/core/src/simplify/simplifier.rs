//! Greedy debt simplification.
//!
//! Reduces a balance map to a short list of direct transfers that would
//! bring every balance to zero, instead of replaying each debtor/creditor pair
//! from the expense history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::money::round_money;
use splitledger_shared::types::{TOLERANCE, UserId};
use tracing::{debug, warn};

use crate::balance::BalanceMap;
use crate::settlement::Settlement;

/// A suggested payment from a debtor to a creditor.
///
/// Not a ledger entry: it only becomes one when a caller records it as a
/// settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The participant who should pay.
    pub from: UserId,
    /// The participant who should receive.
    pub to: UserId,
    /// The amount to pay, rounded to the cent (always positive).
    pub amount: Decimal,
}

impl Transaction {
    /// Returns this suggestion as a completed settlement, as if it had been paid.
    #[must_use]
    pub fn to_completed_settlement(&self) -> Settlement {
        Settlement::completed(self.from, self.to, self.amount)
    }

    /// Returns this suggestion as a pending settlement awaiting confirmation.
    #[must_use]
    pub fn to_pending_settlement(&self) -> Settlement {
        Settlement::pending(self.from, self.to, self.amount)
    }
}

/// A participant's outstanding position while matching.
#[derive(Debug, Clone, Copy)]
struct Position {
    user: UserId,
    remaining: Decimal,
}

/// Stateless debt simplifier.
pub struct DebtSimplifier;

impl DebtSimplifier {
    /// Produces transfers that settle every balance outside `[-0.01, +0.01]`.
    ///
    /// Debtors (balance < -0.01) and creditors (balance > +0.01) are queued
    /// in the map's iteration order. Two cursors walk the queues; each step
    /// pays `min(debt, credit)` from the current debtor to the current
    /// creditor, and a cursor advances once its remaining amount drops below
    /// one cent. Matching stops when either queue runs out.
    ///
    /// Runs in O(debtors + creditors). The result is not always the minimum
    /// number of transfers.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use splitledger_core::balance::BalanceMap;
    /// use splitledger_core::simplify::DebtSimplifier;
    /// use splitledger_shared::types::UserId;
    ///
    /// let balances: BalanceMap = [
    ///     (UserId(1), dec!(-30)),
    ///     (UserId(2), dec!(10)),
    ///     (UserId(3), dec!(20)),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let transfers = DebtSimplifier::simplify(&balances);
    /// assert_eq!(transfers.len(), 2);
    /// assert_eq!(transfers[0].amount, dec!(10.00));
    /// assert_eq!(transfers[1].amount, dec!(20.00));
    /// ```
    #[must_use]
    pub fn simplify(balances: &BalanceMap) -> Vec<Transaction> {
        let (mut debtors, mut creditors) = Self::partition(balances);
        let mut transactions = Vec::with_capacity(debtors.len() + creditors.len());

        let mut i = 0;
        let mut j = 0;
        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];

            let settled = debtor.remaining.min(creditor.remaining);
            transactions.push(Transaction {
                from: debtor.user,
                to: creditor.user,
                amount: round_money(settled),
            });

            debtor.remaining -= settled;
            creditor.remaining -= settled;

            if debtor.remaining < TOLERANCE {
                i += 1;
            }
            if creditor.remaining < TOLERANCE {
                j += 1;
            }
        }

        let unmatched: Decimal = debtors[i..]
            .iter()
            .chain(&creditors[j..])
            .map(|position| position.remaining)
            .sum();
        if unmatched > Decimal::ZERO {
            warn!(
                unmatched = %unmatched,
                "balances do not net to zero; dropping unmatched residual"
            );
        }

        debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transactions = transactions.len(),
            "debts simplified"
        );

        transactions
    }

    /// Splits balances into debtor and creditor queues, skipping settled ones.
    fn partition(balances: &BalanceMap) -> (Vec<Position>, Vec<Position>) {
        let mut debtors = Vec::new();
        let mut creditors = Vec::new();

        for (user, balance) in balances.iter() {
            if balance < -TOLERANCE {
                debtors.push(Position {
                    user,
                    remaining: -balance,
                });
            } else if balance > TOLERANCE {
                creditors.push(Position {
                    user,
                    remaining: balance,
                });
            }
        }

        (debtors, creditors)
    }
}
