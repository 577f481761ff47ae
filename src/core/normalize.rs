//! Reshapes raw per-day outcomes into per-currency records

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::rates::{CurrencyQuote, DayOutcome, DayRates};
use super::selection::{Currency, CurrencySelection};

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Rate {
    pub sale: f64,
    pub purchase: f64,
}

/// One day's selected rates, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: String,
    pub rates: Vec<(Currency, Rate)>,
}

impl DayRecord {
    pub fn rate(&self, currency: Currency) -> Option<Rate> {
        self.rates
            .iter()
            .find(|(c, _)| *c == currency)
            .map(|(_, rate)| *rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRecord {
    Rates(DayRecord),
    Failure(String),
}

// Failures serialize as bare strings, records as `{date, <CODE>: {sale, purchase}, ...}`
impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NormalizedRecord::Failure(message) => serializer.serialize_str(message),
            NormalizedRecord::Rates(record) => {
                let mut map = serializer.serialize_map(Some(record.rates.len() + 1))?;
                map.serialize_entry("date", &record.date)?;
                for (currency, rate) in &record.rates {
                    map.serialize_entry(currency.code(), rate)?;
                }
                map.end()
            }
        }
    }
}

/// Present and non-zero. Zero is treated the same as a missing rate.
fn present(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| *r != 0.0 && !r.is_nan())
}

fn quote_rate(quote: &CurrencyQuote) -> Rate {
    Rate {
        sale: present(quote.sale_rate).unwrap_or(0.0),
        purchase: present(quote.purchase_rate)
            .or_else(|| present(quote.purchase_rate_nb))
            .unwrap_or(0.0),
    }
}

fn normalize_day(day: &DayRates, selection: &CurrencySelection) -> DayRecord {
    let rates = selection
        .iter()
        .filter_map(|currency| {
            day.exchange_rates
                .iter()
                .find(|quote| quote.currency == currency.code())
                .map(|quote| (currency, quote_rate(quote)))
        })
        .collect();

    DayRecord {
        date: day.date.clone(),
        rates,
    }
}

/// Produces one record per outcome, in the same order.
pub fn normalize(outcomes: &[DayOutcome], selection: &CurrencySelection) -> Vec<NormalizedRecord> {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            DayOutcome::Failure(message) => NormalizedRecord::Failure(message.clone()),
            DayOutcome::Success(day) => NormalizedRecord::Rates(normalize_day(day, selection)),
        })
        .collect()
}
