//! Hotspot Tracker CLI
//!
//! Shows status, reward scale, witnesses and recent rewards of a Helium hotspot.

mod report;
mod style;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hotspot_tracker::{track, Config, Currency, ExplorerClient, PriceClient, Timespan, TrackRequest};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use style::*;

#[derive(Parser)]
#[command(name = "hotspot")]
#[command(version)]
#[command(about = "Track your Helium hotspot activities", long_about = None)]
struct Cli {
    /// Helium hotspot address
    wallet_id: String,

    /// Look-back window for rewards
    #[arg(long, value_enum, default_value_t = Timespan::Day)]
    last: Timespan,

    /// Currency for the reward total
    #[arg(long, value_enum, default_value_t = Currency::Eur)]
    currency: Currency,

    /// Helium explorer API endpoint
    #[arg(long, env = "HELIUM_API_URL")]
    api: Option<String>,

    /// Price API endpoint
    #[arg(long, env = "PRICE_API_URL")]
    price_api: Option<String>,

    /// Config file (defaults to ./hotspot.toml, then built-in defaults)
    #[arg(short, long, env = "HOTSPOT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let spinner = if cli.json {
        ProgressBar::hidden()
    } else {
        fetch_spinner()
    };
    init_logging(cli.verbose, spinner.clone());

    if let Err(e) = run(cli, &spinner).await {
        spinner.finish_and_clear();
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, spinner: ProgressBar) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(move || SuspendingWriter::new(spinner.clone(), io::stderr()))
        .init();
}

/// Log writer that clears the spinner while a line is written and redraws it
/// afterwards, so log lines and the spinner never share a terminal row.
struct SuspendingWriter<W> {
    spinner: ProgressBar,
    inner: W,
}

impl<W: Write> SuspendingWriter<W> {
    fn new(spinner: ProgressBar, inner: W) -> Self {
        Self { spinner, inner }
    }
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.spinner.suspend(|| inner.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        let inner = &mut self.inner;
        self.spinner.suspend(|| inner.flush())
    }
}

async fn run(cli: Cli, spinner: &ProgressBar) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .with_overrides(cli.api, cli.price_api);

    let explorer = ExplorerClient::new(&config.explorer.base_url, config.explorer.timeout());
    let prices = PriceClient::new(&config.price.base_url, config.price.timeout());
    let request = TrackRequest {
        wallet_id: cli.wallet_id,
        timespan: cli.last,
        currency: cli.currency,
        asset_id: config.price.asset_id.clone(),
        fiat_decimals: config.report.fiat_decimals,
    };

    spinner.set_message("Fetching wallet data...");
    let result = track(&explorer, &prices, &request).await;
    spinner.finish_and_clear();
    let report = result?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", json);
    } else {
        report::print_report(&report, &config.report);
    }

    Ok(())
}

fn fetch_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.red} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Loading configuration...");
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
