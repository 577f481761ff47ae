//! Core business logic abstractions

pub mod dates;
pub mod log;
pub mod normalize;
pub mod rates;
pub mod selection;

// Re-export main types for cleaner imports
pub use normalize::{DayRecord, NormalizedRecord, Rate, normalize};
pub use rates::{CurrencyQuote, DayOutcome, DayRates, RatesProvider};
pub use selection::{Currency, CurrencySelection, Period, RatesRequest};
