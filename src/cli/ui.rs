use crate::core::{CurrencySelection, NormalizedRecord};
use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn rate_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.4}")).set_alignment(CellAlignment::Right)
}

fn na_cell() -> Cell {
    Cell::new("N/A")
        .fg(Color::DarkGrey)
        .set_alignment(CellAlignment::Right)
}

/// Renders records as an indented structure, one entry per day.
pub fn render_dump(records: &[NormalizedRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Renders records as a table with sale and purchase columns per currency.
pub fn render_table(records: &[NormalizedRecord], selection: &CurrencySelection) -> Table {
    let mut table = new_styled_table();

    let mut header = vec![header_cell("Date")];
    for currency in selection.iter() {
        header.push(header_cell(&format!("{currency} sale")));
        header.push(header_cell(&format!("{currency} purchase")));
    }
    table.set_header(header);

    for record in records {
        match record {
            NormalizedRecord::Rates(day) => {
                let mut row = vec![Cell::new(&day.date)];
                for currency in selection.iter() {
                    match day.rate(currency) {
                        Some(rate) => {
                            row.push(rate_cell(rate.sale));
                            row.push(rate_cell(rate.purchase));
                        }
                        None => {
                            row.push(na_cell());
                            row.push(na_cell());
                        }
                    }
                }
                table.add_row(row);
            }
            NormalizedRecord::Failure(message) => {
                table.add_row(vec![
                    Cell::new("N/A").fg(Color::Red),
                    Cell::new(message).fg(Color::Red),
                ]);
            }
        }
    }

    table
}
