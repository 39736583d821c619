//! Settlement records and their lifecycle.
//!
//! A settlement is a payment between two participants. It is recorded as
//! pending by the sender and only moves balances once the receiver confirms it.

pub mod error;
pub mod service;
pub mod types;

pub use error::SettlementError;
pub use service::SettlementService;
pub use types::{NewSettlementInput, Settlement, SettlementStatus};
