//! Net balance aggregation.
//!
//! This module turns a group's expenses and settlements into a typed,
//! ordered map of signed balances.

pub mod calculator;
pub mod types;

#[cfg(test)]
mod props;

pub use calculator::BalanceCalculator;
pub use types::BalanceMap;
