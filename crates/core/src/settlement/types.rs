//! Settlement domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{GroupId, SettlementId, UserId};

/// Settlement status.
///
/// Only completed settlements move balances. A pending settlement waits for
/// the receiver to confirm the money arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementStatus {
    /// Recorded by the sender, not yet confirmed.
    Pending,
    /// Confirmed by the receiver.
    Completed,
}

impl SettlementStatus {
    /// Returns true if the settlement affects balances.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A payment from one participant to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Storage ID, if the settlement has been persisted.
    #[serde(default)]
    pub id: Option<SettlementId>,
    /// The participant who paid.
    pub from: UserId,
    /// The participant who received the money.
    pub to: UserId,
    /// The amount paid (positive).
    pub amount: Decimal,
    /// Whether the receiver has confirmed it.
    pub status: SettlementStatus,
    /// The group the settlement belongs to, if any.
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Free-form note from the sender.
    #[serde(default)]
    pub note: Option<String>,
    /// When the settlement was recorded.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the receiver confirmed it.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Settlement {
    /// Creates a settlement with the given status.
    #[must_use]
    pub fn new(from: UserId, to: UserId, amount: Decimal, status: SettlementStatus) -> Self {
        Self {
            id: None,
            from,
            to,
            amount,
            status,
            group_id: None,
            note: None,
            created_at: None,
            completed_at: None,
        }
    }

    /// Creates a pending settlement.
    #[must_use]
    pub fn pending(from: UserId, to: UserId, amount: Decimal) -> Self {
        Self::new(from, to, amount, SettlementStatus::Pending)
    }

    /// Creates a completed settlement.
    #[must_use]
    pub fn completed(from: UserId, to: UserId, amount: Decimal) -> Self {
        Self::new(from, to, amount, SettlementStatus::Completed)
    }

    /// Attaches the group the settlement belongs to.
    #[must_use]
    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Returns true if the settlement affects balances.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

/// Input for recording a new settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSettlementInput {
    /// The participant paying.
    pub from: UserId,
    /// The participant being paid.
    pub to: UserId,
    /// The amount paid.
    pub amount: Decimal,
    /// The group both participants must belong to, if any.
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
}
