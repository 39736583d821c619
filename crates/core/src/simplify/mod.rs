//! Debt simplification.
//!
//! Turns net balances into a short list of suggested transfers.

pub mod simplifier;

#[cfg(test)]
mod props;

pub use simplifier::{DebtSimplifier, Transaction};
