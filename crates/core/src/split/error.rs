//! Split error types.
//!
//! Every variant is a flavour of "invalid split": the inputs do not describe a
//! division of the total, and no expense may be created from them.

use rust_decimal::Decimal;
use splitledger_shared::AppError;
use splitledger_shared::types::UserId;
use thiserror::Error;

use super::types::SplitPolicy;

/// Errors that can occur while building a split.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The split policy is not one of EQUAL, EXACT or PERCENTAGE.
    #[error("Invalid split: unknown policy '{0}'")]
    UnknownPolicy(String),

    /// The expense total is zero or negative.
    #[error("Invalid split: total must be positive, got {0}")]
    NonPositiveTotal(Decimal),

    /// No participants were supplied.
    #[error("Invalid split: at least one participant is required")]
    NoParticipants,

    /// A participant appears more than once.
    #[error("Invalid split: participant {0} appears more than once")]
    DuplicateParticipant(UserId),

    /// The policy needs per-participant values but none were given.
    #[error("Invalid split: {0} split requires a value for every participant")]
    MissingValues(SplitPolicy),

    /// A participant has no value.
    #[error("Invalid split: no value supplied for participant {0}")]
    MissingValue(UserId),

    /// A value names someone who is not a participant.
    #[error("Invalid split: value supplied for non-participant {0}")]
    UnexpectedValue(UserId),

    /// A participant has more than one value.
    #[error("Invalid split: more than one value supplied for participant {0}")]
    DuplicateValue(UserId),

    /// An exact amount is negative.
    #[error("Invalid split: amount for participant {0} cannot be negative")]
    NegativeAmount(UserId),

    /// A percentage is negative.
    #[error("Invalid split: percentage for participant {0} cannot be negative")]
    NegativePercentage(UserId),

    /// Exact amounts do not add up to the total.
    #[error("Invalid split: amount mismatch, splits sum to {actual} but total is {expected}")]
    AmountMismatch {
        /// The expense total.
        expected: Decimal,
        /// The sum of the supplied amounts.
        actual: Decimal,
    },

    /// Percentages do not add up to 100.
    #[error("Invalid split: percentage mismatch, percentages sum to {actual} instead of 100")]
    PercentageMismatch {
        /// The sum of the supplied percentages.
        actual: Decimal,
    },

    /// A share or a sum of shares exceeds the largest representable amount.
    #[error("Invalid split: amounts overflow the supported range")]
    AmountOverflow,
}

impl SplitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPolicy(_) => "UNKNOWN_SPLIT_POLICY",
            Self::NonPositiveTotal(_) => "NON_POSITIVE_TOTAL",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::MissingValues(_) => "MISSING_SPLIT_VALUES",
            Self::MissingValue(_) => "MISSING_SPLIT_VALUE",
            Self::UnexpectedValue(_) => "UNEXPECTED_SPLIT_VALUE",
            Self::DuplicateValue(_) => "DUPLICATE_SPLIT_VALUE",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::NegativePercentage(_) => "NEGATIVE_PERCENTAGE",
            Self::AmountMismatch { .. } => "AMOUNT_MISMATCH",
            Self::PercentageMismatch { .. } => "PERCENTAGE_MISMATCH",
        }
    }
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        Self::Validation(err.to_string())
    }
}
