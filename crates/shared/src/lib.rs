//! Shared types, errors, and configuration for SplitLedger.
//!
//! This crate provides common types used across all other crates:
//! - Typed integer IDs for users, groups, expenses and settlements
//! - Money helpers: the decimal parsing boundary, tolerance and rounding
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, EngineConfig, LogConfig, PercentageRounding};
pub use error::{AppError, AppResult};
