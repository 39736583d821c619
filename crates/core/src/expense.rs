//! Expense records.
//!
//! An expense is one purchase fronted by a payer and shared by the
//! participants named in its split lines. Expenses are immutable once built.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{ExpenseId, GroupId, UserId};

use crate::split::{SplitBuilder, SplitError, SplitLine, SplitPolicy, SplitValue};

/// A shared expense with its precomputed split lines.
///
/// Invariant: the split amounts sum to `total_amount`. Expenses built with
/// [`Expense::create`] satisfy it; records loaded from elsewhere are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Storage ID, if the expense has been persisted.
    #[serde(default)]
    pub id: Option<ExpenseId>,
    /// The group the expense belongs to.
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// The participant who paid.
    pub payer: UserId,
    /// The full amount paid (positive).
    pub total_amount: Decimal,
    /// The policy the splits were built with.
    pub split_policy: SplitPolicy,
    /// What each participant owes, in builder order.
    pub splits: Vec<SplitLine>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the expense was recorded.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Creates an expense from already-built split lines.
    #[must_use]
    pub fn new(
        payer: UserId,
        total_amount: Decimal,
        split_policy: SplitPolicy,
        splits: Vec<SplitLine>,
    ) -> Self {
        Self {
            id: None,
            group_id: None,
            payer,
            total_amount,
            split_policy,
            splits,
            description: None,
            created_at: None,
        }
    }

    /// Builds the split lines with `builder` and wraps them in an expense.
    ///
    /// Nothing is created when the split is rejected.
    ///
    /// # Errors
    ///
    /// Returns `SplitError` if the split inputs are inconsistent.
    pub fn create(
        builder: &SplitBuilder,
        payer: UserId,
        policy: SplitPolicy,
        total_amount: Decimal,
        participants: &[UserId],
        values: Option<&[SplitValue]>,
    ) -> Result<Self, SplitError> {
        let splits = builder.build(policy, total_amount, participants, values)?;
        Ok(Self::new(payer, total_amount, policy, splits))
    }

    /// Attaches the group the expense belongs to.
    #[must_use]
    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the sum of all split amounts.
    #[must_use]
    pub fn split_total(&self) -> Decimal {
        self.splits.iter().map(|line| line.amount).sum()
    }

    /// Returns true if the split amounts sum exactly to the total.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.split_total() == self.total_amount
    }

    /// Returns the share owed by `participant`, zero if they are not in the split.
    #[must_use]
    pub fn share_of(&self, participant: UserId) -> Decimal {
        self.splits
            .iter()
            .filter(|line| line.participant == participant)
            .map(|line| line.amount)
            .sum()
    }
}
