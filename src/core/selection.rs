//! Validated command-line inputs: the period and the currency selection

use anyhow::{Result, anyhow, bail};
use std::fmt::Display;
use std::str::FromStr;

pub const MAX_PERIOD: u32 = 10;

/// Number of days to fetch, counting today. Always in `1..=MAX_PERIOD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period(u32);

impl Period {
    pub fn new(days: u32) -> Result<Self> {
        if !(1..=MAX_PERIOD).contains(&days) {
            bail!("Argument must be between 1 and {MAX_PERIOD}");
        }
        Ok(Period(days))
    }

    pub fn days(&self) -> u32 {
        self.0
    }

    /// Day offsets covered by the period, today first.
    pub fn offsets(&self) -> impl Iterator<Item = u32> {
        0..self.0
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days: i64 = s
            .trim()
            .parse()
            .map_err(|_| anyhow!("Argument must be a number!"))?;
        let days = u32::try_from(days)
            .map_err(|_| anyhow!("Argument must be between 1 and {MAX_PERIOD}"))?;
        Period::new(days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Chf,
    Gbp,
    Pln,
    Cad,
}

impl Currency {
    pub const ALLOWED: [Currency; 6] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Chf,
        Currency::Gbp,
        Currency::Pln,
        Currency::Cad,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Chf => "CHF",
            Currency::Gbp => "GBP",
            Currency::Pln => "PLN",
            Currency::Cad => "CAD",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALLOWED
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| anyhow!("Currency name is unknown {}", code))
    }
}

/// Ordered, duplicate-free set of currencies to keep from each day's quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySelection(Vec<Currency>);

impl CurrencySelection {
    pub fn new(currencies: impl IntoIterator<Item = Currency>) -> Self {
        let mut selected = Vec::new();
        for currency in currencies {
            if !selected.contains(&currency) {
                selected.push(currency);
            }
        }
        CurrencySelection(selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = Currency> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CurrencySelection {
    fn default() -> Self {
        CurrencySelection(vec![Currency::Usd, Currency::Eur])
    }
}

/// A validated request: how many days and which currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesRequest {
    pub period: Period,
    pub currencies: CurrencySelection,
}

impl RatesRequest {
    /// Validates raw positional arguments. An empty currency list selects USD and EUR.
    pub fn from_args(period: &str, currencies: &[String]) -> Result<Self> {
        let period = period.parse::<Period>()?;
        let currencies = if currencies.is_empty() {
            CurrencySelection::default()
        } else {
            CurrencySelection::new(
                currencies
                    .iter()
                    .map(|c| c.parse::<Currency>())
                    .collect::<Result<Vec<_>>>()?,
            )
        };
        Ok(RatesRequest { period, currencies })
    }
}
