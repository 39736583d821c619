//! Report data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::money::is_settled;
use splitledger_shared::types::{GroupId, SettlementId, TOLERANCE, UserId};

use crate::expense::Expense;
use crate::settlement::Settlement;

/// Length of the recent-activity window in [`LedgerSummary`].
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Direction of a participant's net balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    /// The group owes this participant (balance > +0.01).
    Owed,
    /// This participant owes the group (balance < -0.01).
    Owes,
    /// Within one cent of zero.
    Settled,
}

impl BalanceStatus {
    /// Classifies a balance using the one-cent tolerance.
    #[must_use]
    pub fn from_balance(balance: Decimal) -> Self {
        if is_settled(balance) {
            Self::Settled
        } else if balance > TOLERANCE {
            Self::Owed
        } else {
            Self::Owes
        }
    }
}

/// A group member with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl MemberInfo {
    /// Creates a member entry.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A participant as shown in a report. Non-members carry no name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    /// User ID.
    pub id: UserId,
    /// Display name, if the participant is on the roster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One row of a group balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// The participant.
    pub user: ParticipantRef,
    /// Net balance rounded to the cent.
    pub balance: Decimal,
    /// Direction of the balance.
    pub status: BalanceStatus,
}

/// A simplified transfer with display names attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTransfer {
    /// Who pays.
    pub from: ParticipantRef,
    /// Who receives.
    pub to: ParticipantRef,
    /// Amount to pay.
    pub amount: Decimal,
}

/// Balances and suggested transfers for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBalanceReport {
    /// Group ID.
    pub group_id: GroupId,
    /// Balances in roster order, then any non-members in first-seen order.
    pub balances: Vec<MemberBalance>,
    /// Transfers that would settle the group.
    pub transactions: Vec<SuggestedTransfer>,
    /// Whether every balance is within one cent of zero.
    pub is_settled: bool,
}

/// Minimal group identity for summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
}

/// A group's history, as input to cross-group summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSnapshot {
    /// Group identity.
    pub group: Option<GroupInfo>,
    /// Group roster.
    pub members: Vec<MemberInfo>,
    /// All expenses recorded in the group.
    pub expenses: Vec<Expense>,
    /// All settlements recorded in the group.
    pub settlements: Vec<Settlement>,
}

/// One user's position in one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupBalance {
    /// The group, if known.
    pub group: Option<GroupInfo>,
    /// Net balance rounded to the cent.
    pub balance: Decimal,
    /// Direction of the balance.
    pub status: BalanceStatus,
}

/// One user's position across all of their groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalanceSummary {
    /// The user.
    pub user: UserId,
    /// Sum of the unrounded per-group balances, rounded to the cent.
    pub overall: Decimal,
    /// Direction of the overall balance.
    pub overall_status: BalanceStatus,
    /// Per-group breakdown in input order.
    pub groups: Vec<UserGroupBalance>,
}

/// Count and sum of a set of settlements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTotals {
    /// Number of settlements.
    pub count: usize,
    /// Sum of their amounts.
    pub total: Decimal,
}

/// Count and sum of the expenses recorded in a time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseWindow {
    /// Number of expenses.
    pub count: usize,
    /// Sum of their totals.
    pub total: Decimal,
}

/// Activity totals for a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Number of expenses.
    pub expense_count: usize,
    /// Sum of expense totals.
    pub expense_total: Decimal,
    /// Expenses created in the last [`RECENT_WINDOW_DAYS`] days. Expenses
    /// without a timestamp are not counted.
    pub last_30_days: ExpenseWindow,
    /// Settlements awaiting confirmation.
    pub pending: SettlementTotals,
    /// Confirmed settlements.
    pub completed: SettlementTotals,
}

/// How much one payer has fronted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpenderTotal {
    /// The payer.
    pub user: ParticipantRef,
    /// Sum of the expenses they paid.
    pub total_paid: Decimal,
    /// Number of expenses they paid.
    pub expense_count: usize,
}

/// Expense activity of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupActivity {
    /// The group, if known.
    pub group: Option<GroupInfo>,
    /// Number of expenses.
    pub expense_count: usize,
    /// Sum of expense totals.
    pub total_amount: Decimal,
    /// Number of roster members.
    pub member_count: usize,
}

/// A settlement still waiting for the receiver's confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDebt {
    /// Storage ID, if persisted.
    pub id: Option<SettlementId>,
    /// Who paid.
    pub from: ParticipantRef,
    /// Who has to confirm.
    pub to: ParticipantRef,
    /// Amount paid.
    pub amount: Decimal,
    /// Group the settlement belongs to.
    pub group_id: Option<GroupId>,
    /// Sender's note.
    pub note: Option<String>,
    /// When the settlement was recorded.
    pub since: Option<DateTime<Utc>>,
}

/// Pending settlements, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsettledDebts {
    /// Sum of ALL pending settlements, not only the listed ones.
    pub total_pending: Decimal,
    /// The largest pending settlements.
    pub settlements: Vec<PendingDebt>,
}
