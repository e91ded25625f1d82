use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Amount, IngredientRecord};

use super::IngredientLedger;

/// Priced snapshot of a ledger, as exported to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub ingredients: Vec<IngredientRecord>,
    pub total: Amount,
}

impl CostReport {
    pub fn from_ledger(ledger: &IngredientLedger, currency: impl Into<String>) -> Self {
        let ingredients = ledger.list_with_prices();
        let total: Amount = ingredients.iter().map(IngredientRecord::computed_price).sum();
        Self {
            generated_at: Utc::now(),
            currency: currency.into(),
            ingredients,
            total,
        }
    }
}
