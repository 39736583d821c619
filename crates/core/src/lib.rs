//! Core ledger engine for SplitLedger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Splits, balances, settlements and reports are all computed from plain
//! values handed in by the caller.
//!
//! # Modules
//!
//! - `split` - Dividing an expense total among participants
//! - `expense` - Expense record with its split lines
//! - `settlement` - Settlement records and their PENDING/COMPLETED workflow
//! - `balance` - Net balance per participant
//! - `simplify` - Reducing balances to a short list of transfers
//! - `reports` - Group, user and ledger summaries

pub mod balance;
pub mod expense;
pub mod reports;
pub mod settlement;
pub mod simplify;
pub mod split;
