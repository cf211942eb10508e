//! CLI entry point: offline rebalance decision checks.
//!
//! Feeds the engine from files instead of a live host: an allocation JSON,
//! a portfolio snapshot JSON (optionally carrying open orders), and a
//! config TOML for threshold and cadence.

use std::path::{Path, PathBuf};
use std::process;

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use lazy_rebalancer::allocation::AllocationTable;
use lazy_rebalancer::cadence::Granularity;
use lazy_rebalancer::config::Config;
use lazy_rebalancer::error::{Error, Result};
use lazy_rebalancer::host::OpenOrder;
use lazy_rebalancer::mock::MockHost;
use lazy_rebalancer::portfolio::{PortfolioSnapshot, Position};
use lazy_rebalancer::Rebalancer;

#[derive(Parser)]
#[command(name = "rebalance")]
#[command(about = "Threshold-driven portfolio rebalance decisions")]
#[command(version)]
struct Cli {
    /// Path to config.toml (falls back to ./config.toml, then defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one tick against a snapshot and print the decision
    Check {
        /// Path to the allocation JSON
        allocation: PathBuf,

        /// Path to the portfolio snapshot JSON
        snapshot: PathBuf,

        /// Evaluation timestamp (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<DateTime<FixedOffset>>,

        /// Last recorded rebalance (RFC 3339)
        #[arg(long)]
        last_rebalance: Option<DateTime<Utc>>,

        /// Treat this as a sub-daily tick (applies the intraday window)
        #[arg(long)]
        intraday: bool,

        /// Print intents as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate an allocation file and show the weight split
    Validate {
        /// Path to the allocation JSON
        allocation: PathBuf,
    },
}

/// On-disk snapshot format: the host-side view of cash, positions, and any
/// outstanding orders.
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    cash: f64,
    #[serde(default)]
    positions: Vec<Position>,
    #[serde(default)]
    open_orders: Vec<OpenOrder>,
}

impl SnapshotFile {
    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::SnapshotRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file: SnapshotFile = serde_json::from_str(&contents)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        if !self.cash.is_finite() {
            return Err(Error::Snapshot("cash must be finite".into()));
        }
        for position in &self.positions {
            if !position.quantity.is_finite() || !position.last_price.is_finite() {
                return Err(Error::Snapshot(format!(
                    "non-finite quantity or price for {}",
                    position.instrument
                )));
            }
        }
        Ok(())
    }
}

fn load_config(path: &Option<PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p),
        None => {
            let fallback = Path::new("config.toml");
            if fallback.exists() {
                Config::load(fallback)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn check(
    config: &Config,
    allocation_path: &Path,
    snapshot_path: &Path,
    now: Option<DateTime<FixedOffset>>,
    last_rebalance: Option<DateTime<Utc>>,
    intraday: bool,
    json: bool,
) -> Result<()> {
    let allocation = AllocationTable::load(allocation_path)?;
    let file = SnapshotFile::load(snapshot_path)?;
    let snapshot = PortfolioSnapshot::new(file.cash, file.positions);

    let mut builder = MockHost::builder();
    if intraday {
        builder = builder.granularity(Granularity::Intraday);
    }
    for order in &file.open_orders {
        builder = builder.with_open_order(order.instrument, order.quantity);
    }
    let host = builder.build();

    let now = now.unwrap_or_else(|| Utc::now().fixed_offset());

    let mut engine = Rebalancer::new(allocation, config)?;
    if let Some(ts) = last_rebalance {
        engine.restore_last_rebalance(ts);
    }

    if snapshot.total_value() > 0.0 {
        println!(
            "Portfolio: ${:.2} total, ${:.2} cash ({:.1}% idle)",
            snapshot.total_value(),
            snapshot.cash(),
            snapshot.cash_fraction() * 100.0,
        );
    } else {
        println!("Portfolio: ${:.2} total", snapshot.total_value());
    }

    let intents = engine.tick(now, &snapshot, &host);

    if intents.is_empty() {
        println!("No rebalance due at {now}.");
    } else if json {
        for intent in &intents {
            println!("{}", serde_json::to_string(intent)?);
        }
    } else {
        println!("\nREBALANCE ({} intents):", intents.len());
        for (i, intent) in intents.iter().enumerate() {
            println!("  {:>3}  {}", i + 1, intent);
        }
    }

    Ok(())
}

fn validate(allocation_path: &Path) -> Result<()> {
    let allocation = AllocationTable::load(allocation_path)?;

    println!("ALLOCATION ({} instruments):", allocation.len());
    for entry in allocation.entries() {
        println!("  {:8} {:>6.2}%", entry.instrument, entry.weight * 100.0);
    }
    println!(
        "\n  {:.2}% invested, {:.2}% cash",
        allocation.invested_weight() * 100.0,
        allocation.cash_weight() * 100.0,
    );

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check {
            allocation,
            snapshot,
            now,
            last_rebalance,
            intraday,
            json,
        } => {
            let config = load_config(&cli.config)?;
            check(
                &config,
                &allocation,
                &snapshot,
                now,
                last_rebalance,
                intraday,
                json,
            )
        }
        Command::Validate { allocation } => validate(&allocation),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
