//! Expense splitting.
//!
//! This module divides an expense total among its participants:
//! - Split policies (EQUAL, EXACT, PERCENTAGE) and split lines
//! - The split builder enforcing the sum invariant
//! - Largest Remainder cent allocation for percentage splits
//! - Error types for rejected splits

mod allocation;
pub mod builder;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use builder::SplitBuilder;
pub use error::SplitError;
pub use types::{SplitLine, SplitPolicy, SplitValue};
