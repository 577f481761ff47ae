pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::OutputFormat;
use crate::core::{NormalizedRecord, RatesProvider, RatesRequest, normalize};
use crate::providers::PrivatBankProvider;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub format: OutputFormat,
}

impl Default for AppOptions {
    fn default() -> Self {
        AppOptions {
            base_url: providers::DEFAULT_BASE_URL.to_string(),
            timeout: None,
            format: OutputFormat::default(),
        }
    }
}

/// Fetches the requested period and keeps only the selected currencies.
pub async fn fetch_normalized(
    provider: &dyn RatesProvider,
    request: &RatesRequest,
) -> Vec<NormalizedRecord> {
    let outcomes = provider.fetch_period(request.period).await;
    normalize(&outcomes, &request.currencies)
}

/// Fetches, normalizes and renders rates for `request`.
pub async fn report(request: &RatesRequest, options: &AppOptions) -> Result<String> {
    let mut provider = PrivatBankProvider::new(&options.base_url);
    if let Some(timeout) = options.timeout {
        provider = provider.with_timeout(timeout);
    }

    let records = fetch_normalized(&provider, request).await;
    debug!(records = records.len(), "Normalized rates");

    cli::render(&records, &request.currencies, options.format)
}

pub async fn run(request: &RatesRequest, options: &AppOptions) -> Result<()> {
    info!(
        days = request.period.days(),
        currencies = request.currencies.len(),
        "Fetching exchange rates"
    );
    let output = report(request, options).await?;
    println!("{output}");
    Ok(())
}
