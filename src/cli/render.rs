use std::io::{self, Write};

use crate::application::IngredientLedger;
use crate::config::DisplayConfig;
use crate::domain::{Amount, format_amount};

const RULE_WIDTH: usize = 66;

/// Amount with the configured currency symbol and decimals.
pub fn money(amount: Amount, display: &DisplayConfig) -> String {
    format!(
        "{}{}",
        display.currency,
        format_amount(amount, display.decimals)
    )
}

/// Print the priced ingredient table followed by the total.
pub fn render_ledger<W: Write>(
    out: &mut W,
    ledger: &IngredientLedger,
    display: &DisplayConfig,
) -> io::Result<()> {
    let records = ledger.list_with_prices();
    if records.is_empty() {
        return writeln!(out, "No ingredients added yet.");
    }

    writeln!(
        out,
        "{:<20} {:>12} {:>12} {:<6} {:>12}",
        "INGREDIENT", "QUANTITY", "UNIT PRICE", "TYPE", "PRICE"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for record in &records {
        writeln!(
            out,
            "{:<20} {:>12} {:>12} {:<6} {:>12}",
            truncate(&record.name, 20),
            record.quantity,
            money(record.unit_price, display),
            record.price_type.as_str(),
            money(record.computed_price(), display)
        )?;
    }
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "{:<20} {:>45}",
        "TOTAL",
        money(ledger.total(), display)
    )
}

pub fn render_total<W: Write>(
    out: &mut W,
    ledger: &IngredientLedger,
    display: &DisplayConfig,
) -> io::Result<()> {
    writeln!(out, "Total Price: {}", money(ledger.total(), display))
}

pub fn render_names<W: Write>(out: &mut W, ledger: &IngredientLedger) -> io::Result<()> {
    let names = ledger.names();
    if names.is_empty() {
        return writeln!(out, "No ingredients added yet.");
    }
    writeln!(out, "Ingredients available for removal:")?;
    for name in names {
        writeln!(out, "  {}", name)?;
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
