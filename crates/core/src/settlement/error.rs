//! Settlement workflow error types.

use rust_decimal::Decimal;
use splitledger_shared::AppError;
use splitledger_shared::types::{GroupId, UserId};
use thiserror::Error;

/// Errors that can occur while recording or confirming a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    // ========== Validation Errors ==========
    /// The amount is zero or negative.
    #[error("Settlement amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Sender and receiver are the same participant.
    #[error("You cannot settle with yourself")]
    SelfSettlement,

    // ========== Permission Errors ==========
    /// One of the parties is not a member of the group.
    #[error("Both participants must be members of group {0}")]
    NotGroupMembers(GroupId),

    /// Someone other than the receiver tried to confirm the settlement.
    #[error("Only the receiver ({receiver}) can confirm the settlement, not {actor}")]
    NotReceiver {
        /// The settlement's receiver.
        receiver: UserId,
        /// The user attempting to confirm.
        actor: UserId,
    },

    // ========== State Errors ==========
    /// The settlement was already confirmed.
    #[error("Settlement is already completed")]
    AlreadyCompleted,
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::SelfSettlement => "SELF_SETTLEMENT",
            Self::NotGroupMembers(_) => "NOT_GROUP_MEMBERS",
            Self::NotReceiver { .. } => "NOT_RECEIVER",
            Self::AlreadyCompleted => "ALREADY_COMPLETED",
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::NonPositiveAmount(_) => Self::Validation(err.to_string()),
            SettlementError::SelfSettlement
            | SettlementError::NotGroupMembers(_)
            | SettlementError::NotReceiver { .. } => Self::Forbidden(err.to_string()),
            SettlementError::AlreadyCompleted => Self::Conflict(err.to_string()),
        }
    }
}
