use std::io::Write;

use crate::application::{AppError, CostReport, IngredientLedger};
use crate::domain::format_amount;

/// Exporter for writing a priced ledger to various formats
pub struct Exporter<'a> {
    ledger: &'a IngredientLedger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a IngredientLedger) -> Self {
        Self { ledger }
    }

    /// Export the priced ingredient list to CSV. Returns the number of rows written.
    pub fn export_csv<W: Write>(&self, writer: W, decimals: usize) -> Result<usize, AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["ingredient", "quantity", "unit_price", "type", "price"])?;

        let mut count = 0;
        for record in self.ledger.list_with_prices() {
            csv_writer.write_record([
                record.name.clone(),
                record.quantity.to_string(),
                record.unit_price.to_string(),
                record.price_type.as_str().to_string(),
                format_amount(record.computed_price(), decimals),
            ])?;
            count += 1;
        }

        csv_writer
            .flush()
            .map_err(|e| AppError::io("flushing CSV output", e))?;
        Ok(count)
    }

    /// Export a JSON cost report. Returns the number of ingredients written.
    pub fn export_json<W: Write>(&self, mut writer: W, currency: &str) -> Result<usize, AppError> {
        let report = CostReport::from_ledger(self.ledger, currency);
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer).map_err(|e| AppError::io("writing JSON output", e))?;
        Ok(report.ingredients.len())
    }
}
