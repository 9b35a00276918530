// In app/src/main.rs

use anyhow::{Context, Result};
use broker::sim::SimBroker;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use num_traits::FromPrimitive;
use runner::feed::{SmaFeed, filter_range};
use runner::{RunConfig, Session};
use rust_decimal::Decimal;
use strategies::sma_close::SmaClose;
use strategies::types::SmaCloseSettings;
use tracing_subscriber::prelude::*;

mod data;
mod settings;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "An SMA close-crossover strategy runner.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the strategy over the embedded demo series.
    Run {
        /// The moving-average window length.
        #[arg(long)]
        maperiod: Option<u32>,

        /// Starting cash balance.
        #[arg(long)]
        cash: Option<f64>,

        /// Per-trade commission rate (e.g. 0.002 for 0.2%).
        #[arg(long)]
        commission: Option<f64>,

        /// Fixed number of units per order.
        #[arg(long)]
        stake: Option<u32>,

        /// Drop bars before this date, YYYY-MM-DD.
        #[arg(long)]
        from_date: Option<String>,

        /// Drop bars after this date, YYYY-MM-DD.
        #[arg(long)]
        to_date: Option<String>,

        /// Suppress per-bar strategy logging.
        #[arg(long)]
        quiet: bool,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new().with_default(tracing::Level::INFO),
    );
    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            maperiod,
            cash,
            commission,
            stake,
            from_date,
            to_date,
            quiet,
        } => {
            handle_run(maperiod, cash, commission, stake, from_date, to_date, quiet)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_run(
    maperiod: Option<u32>,
    cash: Option<f64>,
    commission: Option<f64>,
    stake: Option<u32>,
    from_date: Option<String>,
    to_date: Option<String>,
    quiet: bool,
) -> Result<()> {
    let settings = settings::load_settings().context("Failed to load settings")?;

    // CLI flags win over file/environment settings.
    let maperiod = maperiod.unwrap_or(settings.strategy.maperiod);
    let cash = cash.unwrap_or(settings.run.starting_cash);
    let from_date = from_date.or(settings.run.from_date);
    let to_date = to_date.or(settings.run.to_date);

    let config = RunConfig {
        starting_cash: Decimal::from_f64(cash)
            .with_context(|| format!("Starting cash {cash} is not a valid amount"))?,
        commission_rate: commission.unwrap_or(settings.run.commission_rate),
        stake: stake.unwrap_or(settings.run.stake),
        from_date: parse_date(from_date.as_deref())?,
        to_date: parse_date(to_date.as_deref())?,
    };

    let bars = filter_range(&data::demo_bars(), config.from_date, config.to_date);
    let steps = SmaFeed::new(maperiod).annotate(&bars)?;

    let strategy = SmaClose::new(SmaCloseSettings {
        average_window: maperiod,
        verbose_logging: settings.strategy.verbose_logging && !quiet,
    });
    let sim = SimBroker::new(config.stake);

    let mut session = Session::new(config, Box::new(strategy), Box::new(sim));
    let summary = session.run(&steps)?;

    println!("Starting Portfolio Value: {:.2}", summary.starting_value);
    println!("Final Portfolio Value: {:.2}", summary.final_value);

    Ok(())
}

fn parse_date(date: Option<&str>) -> Result<Option<NaiveDate>> {
    date.map(|d| {
        NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{d}', expected YYYY-MM-DD"))
    })
    .transpose()
}
