//! Group snapshot file format.
//!
//! Amounts arrive as decimal strings and are parsed strictly; nothing in the
//! snapshot is trusted until it has gone through the same builders and
//! checks a live caller would use.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use splitledger_core::expense::Expense;
use splitledger_core::reports::MemberInfo;
use splitledger_core::settlement::{
    NewSettlementInput, Settlement, SettlementService, SettlementStatus,
};
use splitledger_core::split::{SplitBuilder, SplitPolicy, SplitValue};
use splitledger_shared::types::money::parse_decimal;
use splitledger_shared::types::{GroupId, UserId, parse_amount};

/// A group's history as stored on disk.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    /// Group the history belongs to.
    pub group_id: GroupId,
    /// Group roster.
    #[serde(default)]
    pub members: Vec<MemberInfo>,
    /// Recorded expenses.
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    /// Recorded settlements.
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
}

/// An expense as stored on disk, before its split is built.
#[derive(Debug, Deserialize)]
pub struct ExpenseRecord {
    /// Who paid.
    pub payer: UserId,
    /// Total paid, as a decimal string.
    pub amount: String,
    /// `EQUAL`, `EXACT` or `PERCENTAGE`.
    pub split_policy: String,
    /// Who the expense is split among.
    pub participants: Vec<UserId>,
    /// Per-participant amounts or percentages.
    #[serde(default)]
    pub values: Option<Vec<ValueRecord>>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the expense was recorded, RFC 3339.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One participant's amount or percentage.
#[derive(Debug, Deserialize)]
pub struct ValueRecord {
    /// The participant.
    pub participant: UserId,
    /// Amount or percentage, as a decimal string.
    pub value: String,
}

/// A settlement as stored on disk.
#[derive(Debug, Deserialize)]
pub struct SettlementRecord {
    /// Who paid.
    pub from: UserId,
    /// Who received.
    pub to: UserId,
    /// Amount paid, as a decimal string.
    pub amount: String,
    /// `PENDING` or `COMPLETED`.
    pub status: SettlementStatus,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

/// A snapshot with every record validated.
#[derive(Debug)]
pub struct Ledger {
    /// Group ID.
    pub group_id: GroupId,
    /// Group roster.
    pub members: Vec<MemberInfo>,
    /// Expenses with their split lines built.
    pub expenses: Vec<Expense>,
    /// Validated settlements.
    pub settlements: Vec<Settlement>,
}

impl Snapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Malformed snapshot JSON")
    }

    /// Builds every split and validates every settlement.
    ///
    /// Settlement membership is only enforced when a roster is present.
    /// Completed settlements go through the receiver's confirmation at
    /// `loaded_at`.
    pub fn into_ledger(self, builder: &SplitBuilder, loaded_at: DateTime<Utc>) -> Result<Ledger> {
        let group_id = self.group_id;

        let expenses = self
            .expenses
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_expense(builder, group_id)
                    .with_context(|| format!("Invalid expense #{index}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let roster_group = (!self.members.is_empty()).then_some(group_id);
        let members = &self.members;
        let is_member = |_: GroupId, user: UserId| members.iter().any(|m| m.id == user);

        let settlements = self
            .settlements
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_settlement(roster_group, loaded_at, is_member)
                    .with_context(|| format!("Invalid settlement #{index}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Ledger {
            group_id,
            members: self.members,
            expenses,
            settlements,
        })
    }
}

impl ExpenseRecord {
    fn to_expense(&self, builder: &SplitBuilder, group_id: GroupId) -> Result<Expense> {
        let policy: SplitPolicy = self.split_policy.parse()?;
        let total = parse_amount(&self.amount).context("Invalid expense amount")?;

        let values = self
            .values
            .as_deref()
            .map(|records| {
                records
                    .iter()
                    .map(|record| record.to_split_value(policy))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        let mut expense = Expense::create(
            builder,
            self.payer,
            policy,
            total,
            &self.participants,
            values.as_deref(),
        )?
        .in_group(group_id);

        if let Some(description) = &self.description {
            expense = expense.with_description(description.clone());
        }
        expense.created_at = self.created_at;
        Ok(expense)
    }
}

impl ValueRecord {
    fn to_split_value(&self, policy: SplitPolicy) -> Result<SplitValue> {
        // Percentages may carry more than two decimals
        let value = match policy {
            SplitPolicy::Percentage => parse_decimal(&self.value),
            SplitPolicy::Equal | SplitPolicy::Exact => parse_amount(&self.value),
        }
        .with_context(|| format!("Invalid split value for participant {}", self.participant))?;

        Ok(SplitValue::new(self.participant, value))
    }
}

impl SettlementRecord {
    fn to_settlement<M>(
        &self,
        group_id: Option<GroupId>,
        loaded_at: DateTime<Utc>,
        is_member: M,
    ) -> Result<Settlement>
    where
        M: Fn(GroupId, UserId) -> bool,
    {
        let amount = parse_amount(&self.amount).context("Invalid settlement amount")?;

        let input = NewSettlementInput {
            from: self.from,
            to: self.to,
            amount,
            group_id,
            note: self.note.clone(),
        };
        let pending = SettlementService::validate_new(input, loaded_at, is_member)?;

        match self.status {
            SettlementStatus::Pending => Ok(pending),
            SettlementStatus::Completed => {
                Ok(SettlementService::complete(pending, self.to, loaded_at)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn loaded_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap()
    }

    const SNAPSHOT: &str = r#"{
        "group_id": 7,
        "members": [
            {"id": 1, "name": "Alice"},
            {"id": 2, "name": "Bob"},
            {"id": 3, "name": "Carol"}
        ],
        "expenses": [
            {"payer": 1, "amount": "90.00", "split_policy": "EQUAL", "participants": [1, 2, 3]},
            {"payer": 2, "amount": "40", "split_policy": "exact", "participants": [1, 2],
             "values": [{"participant": 1, "value": "25.00"}, {"participant": 2, "value": "15"}]},
            {"payer": 3, "amount": "10.00", "split_policy": "PERCENTAGE", "participants": [1, 3],
             "values": [{"participant": 1, "value": "33.333"}, {"participant": 3, "value": "66.667"}]}
        ],
        "settlements": [
            {"from": 2, "to": 1, "amount": "5.00", "status": "COMPLETED"},
            {"from": 3, "to": 1, "amount": "1.00", "status": "PENDING", "note": "later"}
        ]
    }"#;

    fn load(text: &str) -> Result<Ledger> {
        Snapshot::from_json(text)?.into_ledger(&SplitBuilder::default(), loaded_at())
    }

    #[test]
    fn test_loads_full_snapshot() {
        let ledger = load(SNAPSHOT).unwrap();

        assert_eq!(ledger.group_id, GroupId(7));
        assert_eq!(ledger.members.len(), 3);
        assert_eq!(ledger.expenses.len(), 3);
        assert!(ledger.expenses.iter().all(Expense::is_balanced));
        assert_eq!(ledger.expenses[1].share_of(UserId(1)), dec!(25.00));
        assert_eq!(ledger.expenses[2].share_of(UserId(1)), dec!(3.33));
        assert_eq!(ledger.expenses[0].group_id, Some(GroupId(7)));

        assert!(ledger.settlements[0].is_completed());
        assert_eq!(ledger.settlements[0].completed_at, Some(loaded_at()));
        assert!(!ledger.settlements[1].is_completed());
        assert_eq!(ledger.settlements[1].note.as_deref(), Some("later"));
    }

    #[test]
    fn test_expense_timestamp_is_kept() {
        let text = r#"{"group_id": 1, "expenses": [
            {"payer": 1, "amount": "10", "split_policy": "EQUAL", "participants": [1],
             "created_at": "2026-04-20T18:00:00Z"},
            {"payer": 1, "amount": "5", "split_policy": "EQUAL", "participants": [1]}
        ]}"#;
        let ledger = load(text).unwrap();
        assert_eq!(
            ledger.expenses[0].created_at,
            Some(Utc.with_ymd_and_hms(2026, 4, 20, 18, 0, 0).unwrap())
        );
        assert!(ledger.expenses[1].created_at.is_none());
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let text = r#"{"group_id": 1, "expenses": [
            {"payer": 1, "amount": "10", "split_policy": "SHARES", "participants": [1]}
        ]}"#;
        let err = load(text).unwrap_err();
        assert!(format!("{err:#}").contains("unknown policy"));
        assert!(format!("{err:#}").contains("expense #0"));
    }

    #[test]
    fn test_rejects_over_precise_amount() {
        let text = r#"{"group_id": 1, "expenses": [
            {"payer": 1, "amount": "10.001", "split_policy": "EQUAL", "participants": [1]}
        ]}"#;
        assert!(load(text).is_err());
    }

    #[test]
    fn test_rejects_mismatched_exact_split() {
        let text = r#"{"group_id": 1, "expenses": [
            {"payer": 1, "amount": "10", "split_policy": "EXACT", "participants": [1, 2],
             "values": [{"participant": 1, "value": "4"}, {"participant": 2, "value": "4"}]}
        ]}"#;
        let err = load(text).unwrap_err();
        assert!(format!("{err:#}").contains("amount mismatch"));
    }

    #[test]
    fn test_rejects_settlement_with_non_member() {
        let text = r#"{"group_id": 1,
            "members": [{"id": 1, "name": "Alice"}],
            "settlements": [{"from": 9, "to": 1, "amount": "5", "status": "PENDING"}]
        }"#;
        let err = load(text).unwrap_err();
        assert!(format!("{err:#}").contains("settlement #0"));
    }

    #[test]
    fn test_settlement_membership_skipped_without_roster() {
        let text = r#"{"group_id": 1,
            "settlements": [{"from": 9, "to": 1, "amount": "5", "status": "COMPLETED"}]
        }"#;
        let ledger = load(text).unwrap();
        assert!(ledger.settlements[0].is_completed());
        assert!(ledger.settlements[0].group_id.is_none());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = load("{not json").unwrap_err();
        assert!(format!("{err:#}").contains("Malformed snapshot JSON"));
    }
}
