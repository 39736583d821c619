//! SplitLedger CLI
//!
//! Reads a group snapshot, runs it through the ledger engine and prints the
//! group balance report, activity totals and open debts as JSON.
//!
//! Usage: `splitledger-cli <snapshot.json>`

mod snapshot;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use splitledger_core::reports::{
    GroupBalanceReport, LedgerSummary, ReportService, SpenderTotal, UnsettledDebts,
};
use splitledger_core::split::SplitBuilder;
use splitledger_shared::{AppConfig, LogConfig};

use crate::snapshot::Snapshot;

/// Entries listed in the ranked sections of the output.
const TOP_LIMIT: usize = 10;

/// What gets printed: the group report plus activity totals.
#[derive(Debug, Serialize)]
struct Output {
    #[serde(flatten)]
    report: GroupBalanceReport,
    summary: LedgerSummary,
    top_spenders: Vec<SpenderTotal>,
    unsettled: UnsettledDebts,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.log);

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: splitledger-cli <snapshot.json>");
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read snapshot {path}"))?;

    let now = chrono::Utc::now();
    let builder = SplitBuilder::new(config.engine.percentage_rounding);
    let ledger = Snapshot::from_json(&text)?.into_ledger(&builder, now)?;
    info!(
        group_id = %ledger.group_id,
        expenses = ledger.expenses.len(),
        settlements = ledger.settlements.len(),
        "snapshot loaded"
    );

    let output = Output {
        report: ReportService::group_report(
            ledger.group_id,
            &ledger.members,
            &ledger.expenses,
            &ledger.settlements,
        ),
        summary: ReportService::ledger_summary(&ledger.expenses, &ledger.settlements, now),
        top_spenders: ReportService::top_spenders(&ledger.expenses, &ledger.members, TOP_LIMIT),
        unsettled: ReportService::unsettled_debts(
            &ledger.settlements,
            &ledger.members,
            TOP_LIMIT,
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
fn init_tracing(log: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));

    // Logs go to stderr so stdout stays pure JSON
    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
