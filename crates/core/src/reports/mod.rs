//! Report generation.
//!
//! Shapes balances and simplified transfers for display:
//! - Group balance report
//! - Per-user summary across groups
//! - Ledger activity totals, including the last 30 days
//! - Top spenders, most active groups and unsettled debts

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
