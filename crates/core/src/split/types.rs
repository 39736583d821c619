//! Split domain types.
//!
//! A split divides one expense's total among the participants who share it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::UserId;

use super::error::SplitError;

/// The rule used to divide an expense among its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitPolicy {
    /// Everyone pays the same share; the first participant absorbs the leftover cents.
    Equal,
    /// Every participant states the amount they owe.
    Exact,
    /// Every participant states the percentage of the total they owe.
    Percentage,
}

impl SplitPolicy {
    /// Returns true if this policy needs one value per participant.
    #[must_use]
    pub const fn requires_values(self) -> bool {
        matches!(self, Self::Exact | Self::Percentage)
    }
}

impl std::fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => write!(f, "EQUAL"),
            Self::Exact => write!(f, "EXACT"),
            Self::Percentage => write!(f, "PERCENTAGE"),
        }
    }
}

impl std::str::FromStr for SplitPolicy {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EQUAL" => Ok(Self::Equal),
            "EXACT" => Ok(Self::Exact),
            "PERCENTAGE" => Ok(Self::Percentage),
            _ => Err(SplitError::UnknownPolicy(s.to_string())),
        }
    }
}

/// A caller-supplied value for one participant.
///
/// For [`SplitPolicy::Exact`] the value is an amount; for
/// [`SplitPolicy::Percentage`] it is a percentage of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitValue {
    /// The participant the value belongs to.
    pub participant: UserId,
    /// The amount or percentage.
    pub value: Decimal,
}

impl SplitValue {
    /// Creates a new split value.
    #[must_use]
    pub const fn new(participant: UserId, value: Decimal) -> Self {
        Self { participant, value }
    }
}

/// One participant's share of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitLine {
    /// The participant who owes this share.
    pub participant: UserId,
    /// The amount owed (never negative).
    pub amount: Decimal,
    /// The percentage this share represents, for percentage splits only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

impl SplitLine {
    /// Creates a split line without a percentage.
    #[must_use]
    pub const fn new(participant: UserId, amount: Decimal) -> Self {
        Self {
            participant,
            amount,
            percentage: None,
        }
    }

    /// Creates a split line for a percentage split.
    #[must_use]
    pub const fn with_percentage(participant: UserId, amount: Decimal, percentage: Decimal) -> Self {
        Self {
            participant,
            amount,
            percentage: Some(percentage),
        }
    }
}
