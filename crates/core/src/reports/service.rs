//! Report generation service.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use splitledger_shared::types::money::{is_settled, round_money};
use splitledger_shared::types::{GroupId, UserId};
use tracing::debug;

use super::types::{
    BalanceStatus, ExpenseWindow, GroupActivity, GroupBalanceReport, GroupSnapshot,
    LedgerSummary, MemberBalance, MemberInfo, ParticipantRef, PendingDebt, RECENT_WINDOW_DAYS,
    SettlementTotals, SpenderTotal, SuggestedTransfer, UnsettledDebts, UserBalanceSummary,
    UserGroupBalance,
};
use crate::balance::BalanceCalculator;
use crate::expense::Expense;
use crate::settlement::Settlement;
use crate::simplify::DebtSimplifier;

/// Service for shaping ledger results into reports.
pub struct ReportService;

impl ReportService {
    /// Generates the balance report for one group.
    ///
    /// Every member is listed, at zero if untouched, followed by any
    /// non-member who appears in the history. Balances are rounded to the
    /// cent for display; transfers are computed from the exact balances.
    #[must_use]
    pub fn group_report(
        group_id: GroupId,
        members: &[MemberInfo],
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> GroupBalanceReport {
        let roster: Vec<UserId> = members.iter().map(|m| m.id).collect();
        let names = Names::new(members);
        let participant = |id: UserId| names.participant(id);

        let exact = BalanceCalculator::calculate_with_roster(&roster, expenses, settlements);

        let balances: Vec<MemberBalance> = exact
            .iter()
            .map(|(user, balance)| MemberBalance {
                user: participant(user),
                balance: round_money(balance),
                status: BalanceStatus::from_balance(balance),
            })
            .collect();

        let transactions: Vec<SuggestedTransfer> = DebtSimplifier::simplify(&exact)
            .into_iter()
            .map(|t| SuggestedTransfer {
                from: participant(t.from),
                to: participant(t.to),
                amount: t.amount,
            })
            .collect();

        let settled = exact.iter().all(|(_, balance)| is_settled(balance));

        debug!(
            group_id = %group_id,
            members = members.len(),
            transfers = transactions.len(),
            settled,
            "group report generated"
        );

        GroupBalanceReport {
            group_id,
            balances,
            transactions,
            is_settled: settled,
        }
    }

    /// Summarises one user's position across several groups.
    ///
    /// The overall balance sums the exact per-group balances before rounding.
    #[must_use]
    pub fn user_summary(user: UserId, groups: &[GroupSnapshot]) -> UserBalanceSummary {
        let mut overall = Decimal::ZERO;
        let mut breakdown = Vec::with_capacity(groups.len());

        for snapshot in groups {
            let balance =
                BalanceCalculator::calculate(&snapshot.expenses, &snapshot.settlements).get(user);
            overall += balance;
            breakdown.push(UserGroupBalance {
                group: snapshot.group.clone(),
                balance: round_money(balance),
                status: BalanceStatus::from_balance(balance),
            });
        }

        UserBalanceSummary {
            user,
            overall: round_money(overall),
            overall_status: BalanceStatus::from_balance(overall),
            groups: breakdown,
        }
    }

    /// Counts and totals expenses and settlements.
    ///
    /// `last_30_days` covers expenses created at or after
    /// `now - RECENT_WINDOW_DAYS`.
    #[must_use]
    pub fn ledger_summary(
        expenses: &[Expense],
        settlements: &[Settlement],
        now: DateTime<Utc>,
    ) -> LedgerSummary {
        let window_start = now - Duration::days(RECENT_WINDOW_DAYS);
        let mut recent = ExpenseWindow::default();
        for expense in expenses {
            if expense.created_at.is_some_and(|at| at >= window_start) {
                recent.count += 1;
                recent.total += expense.total_amount;
            }
        }

        let mut pending = SettlementTotals::default();
        let mut completed = SettlementTotals::default();

        for settlement in settlements {
            let bucket = if settlement.is_completed() {
                &mut completed
            } else {
                &mut pending
            };
            bucket.count += 1;
            bucket.total += settlement.amount;
        }

        LedgerSummary {
            expense_count: expenses.len(),
            expense_total: expenses.iter().map(|e| e.total_amount).sum(),
            last_30_days: recent,
            pending,
            completed,
        }
    }

    /// Ranks payers by how much they have fronted, largest first.
    ///
    /// Equal totals keep first-seen order. At most `limit` entries.
    #[must_use]
    pub fn top_spenders(
        expenses: &[Expense],
        members: &[MemberInfo],
        limit: usize,
    ) -> Vec<SpenderTotal> {
        let mut paid: IndexMap<UserId, (Decimal, usize)> = IndexMap::new();
        for expense in expenses {
            let entry = paid.entry(expense.payer).or_insert((Decimal::ZERO, 0));
            entry.0 += expense.total_amount;
            entry.1 += 1;
        }

        let names = Names::new(members);
        let mut spenders: Vec<SpenderTotal> = paid
            .into_iter()
            .map(|(user, (total_paid, expense_count))| SpenderTotal {
                user: names.participant(user),
                total_paid,
                expense_count,
            })
            .collect();

        spenders.sort_by(|a, b| b.total_paid.cmp(&a.total_paid));
        spenders.truncate(limit);
        spenders
    }

    /// Ranks groups with at least one expense by total spent, largest first.
    ///
    /// Equal totals keep input order. At most `limit` entries.
    #[must_use]
    pub fn group_activity(groups: &[GroupSnapshot], limit: usize) -> Vec<GroupActivity> {
        let mut activity: Vec<GroupActivity> = groups
            .iter()
            .filter(|snapshot| !snapshot.expenses.is_empty())
            .map(|snapshot| GroupActivity {
                group: snapshot.group.clone(),
                expense_count: snapshot.expenses.len(),
                total_amount: snapshot.expenses.iter().map(|e| e.total_amount).sum(),
                member_count: snapshot.members.len(),
            })
            .collect();

        activity.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        activity.truncate(limit);
        activity
    }

    /// Lists PENDING settlements, largest first, with the total still pending.
    ///
    /// `total_pending` sums every pending settlement; only the first `limit`
    /// are listed. Equal amounts keep input order.
    #[must_use]
    pub fn unsettled_debts(
        settlements: &[Settlement],
        members: &[MemberInfo],
        limit: usize,
    ) -> UnsettledDebts {
        let mut pending: Vec<&Settlement> =
            settlements.iter().filter(|s| !s.is_completed()).collect();
        let total_pending = pending.iter().map(|s| s.amount).sum();

        pending.sort_by(|a, b| b.amount.cmp(&a.amount));

        let names = Names::new(members);
        let listed = pending
            .into_iter()
            .take(limit)
            .map(|s| PendingDebt {
                id: s.id,
                from: names.participant(s.from),
                to: names.participant(s.to),
                amount: s.amount,
                group_id: s.group_id,
                note: s.note.clone(),
                since: s.created_at,
            })
            .collect();

        UnsettledDebts {
            total_pending,
            settlements: listed,
        }
    }
}

/// Display-name lookup over a roster.
struct Names<'a>(HashMap<UserId, &'a str>);

impl<'a> Names<'a> {
    fn new(members: &'a [MemberInfo]) -> Self {
        Self(members.iter().map(|m| (m.id, m.name.as_str())).collect())
    }

    fn participant(&self, id: UserId) -> ParticipantRef {
        ParticipantRef {
            id,
            name: self.0.get(&id).map(|name| (*name).to_string()),
        }
    }
}
