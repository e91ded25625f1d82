use std::io::Read;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::{AppError, IngredientLedger};
use crate::domain::parse_amount;

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Row that could not be imported
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub error: String,
}

/// Raw CSV row. Numbers are kept as text so that bad values are reported
/// per row instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct IngredientRow {
    #[serde(alias = "ingredient")]
    name: String,
    quantity: String,
    unit_price: String,
    #[serde(rename = "type", alias = "price_type")]
    price_type: String,
}

/// Importer for loading ingredient rows into a ledger
pub struct Importer<'a> {
    ledger: &'a mut IngredientLedger,
}

impl<'a> Importer<'a> {
    pub fn new(ledger: &'a mut IngredientLedger) -> Self {
        Self { ledger }
    }

    /// Import ingredients from CSV with header `name,quantity,unit_price,type`.
    /// Invalid rows are collected in the result and skipped.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<ImportResult, AppError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut result = ImportResult::default();

        for (line_num, row) in csv_reader.deserialize::<IngredientRow>().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let row = match row {
                Ok(r) => r,
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            match self.import_row(&row) {
                Ok(()) => result.imported += 1,
                Err(error) => {
                    warn!(line, "Skipping ingredient row: {}", error);
                    result.errors.push(ImportError { line, error });
                }
            }
        }

        debug!(
            imported = result.imported,
            errors = result.errors.len(),
            "CSV import finished"
        );
        Ok(result)
    }

    fn import_row(&mut self, row: &IngredientRow) -> Result<(), String> {
        let quantity = parse_amount(&row.quantity)
            .map_err(|e| format!("quantity '{}': {}", row.quantity, e))?;
        let unit_price = parse_amount(&row.unit_price)
            .map_err(|e| format!("unit price '{}': {}", row.unit_price, e))?;

        self.ledger
            .add_tagged(row.name.as_str(), quantity, unit_price, &row.price_type)
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_csv() {
        let data = "name,quantity,unit_price,type\nFlour,500,2.00,kg\nEgg,3,0.50,unit\n";
        let mut ledger = IngredientLedger::new();

        let result = Importer::new(&mut ledger)
            .import_csv(data.as_bytes())
            .unwrap();

        assert_eq!(result.imported, 2);
        assert!(result.errors.is_empty());
        assert_eq!(ledger.names(), vec!["Flour", "Egg"]);
        assert!((ledger.total() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_import_accepts_header_aliases() {
        let data = "ingredient,quantity,unit_price,price_type\nButter,250,8,kg\n";
        let mut ledger = IngredientLedger::new();

        let result = Importer::new(&mut ledger)
            .import_csv(data.as_bytes())
            .unwrap();

        assert_eq!(result.imported, 1);
        assert!((ledger.total() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_import_collects_row_errors() {
        let data = "name,quantity,unit_price,type\n\
                    ,100,1,kg\n\
                    Milk,1,1.20,litre\n\
                    Salt,abc,0.5,kg\n\
                    Egg,3,0.50,unit\n";
        let mut ledger = IngredientLedger::new();

        let result = Importer::new(&mut ledger)
            .import_csv(data.as_bytes())
            .unwrap();

        assert_eq!(result.imported, 1);
        let lines: Vec<usize> = result.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert!(result.errors[0].error.contains("ingredient name"));
        assert!(result.errors[1].error.contains("litre"));
        assert_eq!(ledger.len(), 1);
    }
}
