//! Console presentation of normalized rates

pub mod ui;

use crate::core::{CurrencySelection, NormalizedRecord};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented structure, one entry per day
    #[default]
    Dump,
    /// Table with sale and purchase columns per currency
    Table,
}

pub fn render(
    records: &[NormalizedRecord],
    selection: &CurrencySelection,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Dump => ui::render_dump(records),
        OutputFormat::Table => Ok(ui::render_table(records, selection).to_string()),
    }
}
