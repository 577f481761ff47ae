//! Exchange rate abstractions and upstream payload types

use async_trait::async_trait;
use serde::Deserialize;

use super::selection::Period;

/// One currency's rates for one day, as returned by the upstream service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyQuote {
    // The base-currency row upstream carries no `currency` field
    #[serde(default)]
    pub currency: String,
    pub sale_rate: Option<f64>,
    pub purchase_rate: Option<f64>,
    #[serde(rename = "purchaseRateNB")]
    pub purchase_rate_nb: Option<f64>,
}

/// The parts of a day's payload the tool consumes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRates {
    pub date: String,
    #[serde(default, rename = "exchangeRate")]
    pub exchange_rates: Vec<CurrencyQuote>,
}

/// Outcome of fetching a single day.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    Success(DayRates),
    Failure(String),
}

impl DayOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, DayOutcome::Failure(_))
    }
}

/// A source of daily rates for the most recent `period` days.
///
/// Implementations return exactly one outcome per day, ordered by offset
/// (index 0 is today). Per-day failures are reported as
/// [`DayOutcome::Failure`] and never abort the batch.
#[async_trait]
pub trait RatesProvider: Send + Sync {
    async fn fetch_period(&self, period: Period) -> Vec<DayOutcome>;
}
