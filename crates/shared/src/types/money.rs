//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal` carried at two fraction digits,
//! and every string that enters the ledger goes through [`parse_amount`] or
//! [`parse_decimal`] rather than an ad-hoc cast.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use thiserror::Error;

/// Number of fraction digits carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// One cent. Sums and balances within this band of each other are equal.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, MONEY_SCALE);

/// Errors raised while parsing a monetary value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The input was empty or whitespace.
    #[error("Amount is required")]
    Empty,

    /// The input is not a decimal number.
    #[error("Invalid decimal value: {0}")]
    Invalid(String),

    /// The input is negative where only non-negative values are allowed.
    #[error("Amount cannot be negative: {0}")]
    Negative(Decimal),

    /// The input carries more fraction digits than a monetary amount may have.
    #[error("Amount {0} has more than two decimal places")]
    TooPrecise(Decimal),
}

impl MoneyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "AMOUNT_REQUIRED",
            Self::Invalid(_) => "INVALID_DECIMAL",
            Self::Negative(_) => "NEGATIVE_AMOUNT",
            Self::TooPrecise(_) => "AMOUNT_TOO_PRECISE",
        }
    }
}

/// Parses any decimal value (percentages, rates) without a scale limit.
///
/// Accepts plain and scientific notation; rejects empty input and anything
/// that is not a number. Never falls back to zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use splitledger_shared::types::money::parse_decimal;
///
/// assert_eq!(parse_decimal("33.333").unwrap(), dec!(33.333));
/// assert!(parse_decimal("abc").is_err());
/// ```
pub fn parse_decimal(input: &str) -> Result<Decimal, MoneyError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyError::Empty);
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| MoneyError::Invalid(trimmed.to_string()))
}

/// Parses a non-negative monetary amount with at most two fraction digits.
///
/// Trailing zeros beyond the second digit are accepted (`"1.500"` is `1.50`).
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use splitledger_shared::types::money::parse_amount;
///
/// assert_eq!(parse_amount("10").unwrap(), dec!(10.00));
/// assert!(parse_amount("-1").is_err());
/// assert!(parse_amount("1.005").is_err());
/// ```
pub fn parse_amount(input: &str) -> Result<Decimal, MoneyError> {
    let value = parse_decimal(input)?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoneyError::Negative(value));
    }

    let normalized = value.normalize();
    if normalized.scale() > MONEY_SCALE {
        return Err(MoneyError::TooPrecise(value));
    }

    let mut amount = normalized;
    amount.rescale(MONEY_SCALE);
    Ok(amount)
}

/// Rounds a value to exactly two decimal places using Banker's Rounding.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Rounds a value down (toward negative infinity) to exactly two decimal places.
#[must_use]
pub fn floor_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToNegativeInfinity);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Returns true if `a` and `b` differ by at most one cent.
#[must_use]
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Returns true if a balance is inside the settled band `[-0.01, +0.01]`.
#[must_use]
pub fn is_settled(balance: Decimal) -> bool {
    balance >= -TOLERANCE && balance <= TOLERANCE
}
