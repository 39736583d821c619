//! Settlement service for recording and confirming payments.
//!
//! This module implements the two state transitions of a settlement:
//! recording it as pending, and the receiver confirming it as completed.
//! Persisting the result is the caller's job.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use splitledger_shared::types::money::round_money;
use splitledger_shared::types::{GroupId, UserId};
use tracing::{debug, info, warn};

use super::error::SettlementError;
use super::types::{NewSettlementInput, Settlement, SettlementStatus};

/// Stateless service for settlement transitions.
pub struct SettlementService;

impl SettlementService {
    /// Validate a new settlement and return it in PENDING state.
    ///
    /// Checks, in order:
    /// 1. The amount (rounded to the cent) is positive
    /// 2. Sender and receiver differ
    /// 3. If a group is given, both parties are members of it
    ///
    /// # Arguments
    /// * `input` - The settlement to record
    /// * `recorded_at` - Timestamp stored as `created_at`
    /// * `is_member` - Membership lookup for `(group, user)`
    ///
    /// # Errors
    ///
    /// Returns `SettlementError` if any check fails.
    pub fn validate_new<M>(
        input: NewSettlementInput,
        recorded_at: DateTime<Utc>,
        is_member: M,
    ) -> Result<Settlement, SettlementError>
    where
        M: Fn(GroupId, UserId) -> bool,
    {
        let amount = round_money(input.amount);
        if amount <= Decimal::ZERO {
            return Err(SettlementError::NonPositiveAmount(input.amount));
        }

        if input.from == input.to {
            return Err(SettlementError::SelfSettlement);
        }

        if let Some(group_id) = input.group_id {
            if !is_member(group_id, input.from) || !is_member(group_id, input.to) {
                warn!(
                    group_id = %group_id,
                    from = %input.from,
                    to = %input.to,
                    "settlement rejected: parties are not both group members"
                );
                return Err(SettlementError::NotGroupMembers(group_id));
            }
        }

        debug!(
            from = %input.from,
            to = %input.to,
            amount = %amount,
            "settlement recorded as pending"
        );

        Ok(Settlement {
            id: None,
            from: input.from,
            to: input.to,
            amount,
            status: SettlementStatus::Pending,
            group_id: input.group_id,
            note: input.note.filter(|note| !note.trim().is_empty()),
            created_at: Some(recorded_at),
            completed_at: None,
        })
    }

    /// Confirm a pending settlement.
    ///
    /// Only the receiver may confirm, and only once.
    ///
    /// # Errors
    ///
    /// * `SettlementError::NotReceiver` if `confirmed_by` is not the receiver
    /// * `SettlementError::AlreadyCompleted` if the settlement is not pending
    pub fn complete(
        settlement: Settlement,
        confirmed_by: UserId,
        confirmed_at: DateTime<Utc>,
    ) -> Result<Settlement, SettlementError> {
        if settlement.to != confirmed_by {
            warn!(
                receiver = %settlement.to,
                actor = %confirmed_by,
                "settlement confirmation rejected: actor is not the receiver"
            );
            return Err(SettlementError::NotReceiver {
                receiver: settlement.to,
                actor: confirmed_by,
            });
        }

        if settlement.status.is_completed() {
            return Err(SettlementError::AlreadyCompleted);
        }

        info!(
            from = %settlement.from,
            to = %settlement.to,
            amount = %settlement.amount,
            "settlement completed"
        );

        Ok(Settlement {
            status: SettlementStatus::Completed,
            completed_at: Some(confirmed_at),
            ..settlement
        })
    }
}
