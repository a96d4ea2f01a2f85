//! # cash-report
//!
//! Prints the cashier closing report from the configured store.
//!
//! ```text
//! cash-report                      today's report, paper layout
//! cash-report --date 2026-10-15    an earlier day
//! cash-report --json               DailySummary as JSON
//! cash-report --clear-today        print today's report, then delete it
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info};

use comanda_core::SystemClock;
use comanda_pos::{
    init_tracing, DocumentRenderer, PosConfig, PosResult, PosSession, Printer, StdoutPrinter,
};
use comanda_store::FileStore;

#[derive(Parser, Debug)]
#[clap(version, about = "Cashier closing report for Comanda POS")]
struct Cli {
    /// Config file (defaults to comanda.toml in the platform config dir)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Report day as YYYY-MM-DD (defaults to today)
    #[clap(short, long)]
    date: Option<NaiveDate>,

    /// Emit the summary as JSON instead of the paper layout
    #[clap(long)]
    json: bool,

    /// Delete today's entries after printing the report
    #[clap(long, conflicts_with = "date")]
    clear_today: bool,
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "cash-report failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> PosResult<()> {
    let config = PosConfig::load(cli.config)?;
    let data_dir = config.data_dir()?;
    info!(data_dir = %data_dir.display(), "Opening store");

    let store = FileStore::open(data_dir)?;
    let mut session = PosSession::open(store, SystemClock, config.default_table_count);

    let summary = match cli.date {
        Some(day) => session.summary_for(day),
        None => session.daily_summary(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        StdoutPrinter.print(&DocumentRenderer::from_config(&config).closing_report(&summary));
    }

    if cli.clear_today {
        let removed = session.clear_today();
        info!(removed, "Cleared today's orders");
    }

    Ok(())
}
