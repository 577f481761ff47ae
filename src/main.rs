use anyhow::{Result, anyhow};
use clap::Parser;
use console::style;
use pbrates::cli::OutputFormat;
use pbrates::core::RatesRequest;
use pbrates::core::log::init_logging;
use pbrates::providers::DEFAULT_BASE_URL;
use std::time::Duration;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Number of days to fetch, counting today (1-10)
    #[arg(allow_negative_numbers = true)]
    period: Option<String>,

    /// Currencies to show: USD, EUR, CHF, GBP, PLN, CAD [default: USD EUR]
    currencies: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dump)]
    format: OutputFormat,

    /// Base URL of the rates API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let request = match parse_request(cli.period.as_deref(), &cli.currencies) {
        Ok(request) => request,
        Err(e) => {
            println!("{} {e}", style("Arguments error!").red());
            std::process::exit(1);
        }
    };

    let options = pbrates::AppOptions {
        base_url: cli.base_url,
        timeout: cli.timeout.map(Duration::from_secs),
        format: cli.format,
    };

    let result = pbrates::run(&request, &options).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

// A missing period is reported like any other invalid argument
fn parse_request(period: Option<&str>, currencies: &[String]) -> Result<RatesRequest> {
    let period = period.ok_or_else(|| anyhow!("Period argument is required"))?;
    RatesRequest::from_args(period, currencies)
}
