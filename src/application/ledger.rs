use tracing::{debug, info, warn};

use crate::domain::{Amount, IngredientRecord, PriceType, ValidationError, compute_total};

/// Ordered list of ingredients for one session.
///
/// Construct one per session and hand it to whatever renders or mutates it.
/// Mutations (`add`, `remove`) and queries (`list_with_prices`, `total`) are
/// kept apart: callers mutate, then re-query.
#[derive(Debug, Clone, Default)]
pub struct IngredientLedger {
    records: Vec<IngredientRecord>,
}

impl IngredientLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ingredient. Names need not be unique.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        quantity: Amount,
        unit_price: Amount,
        price_type: PriceType,
    ) -> Result<&IngredientRecord, ValidationError> {
        let record = match IngredientRecord::new(name, quantity, unit_price, price_type) {
            Ok(record) => record,
            Err(e) => {
                warn!("Rejected ingredient: {}", e);
                return Err(e);
            }
        };

        info!(
            name = %record.name,
            quantity = record.quantity,
            unit_price = record.unit_price,
            price_type = %record.price_type,
            "Added ingredient"
        );
        let index = self.records.len();
        self.records.push(record);
        Ok(&self.records[index])
    }

    /// Append an ingredient whose price type is given as a textual tag ("kg", "unit").
    pub fn add_tagged(
        &mut self,
        name: impl Into<String>,
        quantity: Amount,
        unit_price: Amount,
        price_tag: &str,
    ) -> Result<&IngredientRecord, ValidationError> {
        let price_type = price_tag.parse::<PriceType>().inspect_err(|e| {
            warn!("Rejected ingredient: {}", e);
        })?;
        self.add(name, quantity, unit_price, price_type)
    }

    /// Remove every ingredient with exactly this name. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.name != name);
        let removed = before - self.records.len();

        if removed > 0 {
            info!(name, removed, "Removed ingredient");
        } else {
            debug!(name, "Nothing to remove");
        }
        removed
    }

    /// All ingredients in insertion order, each with a freshly computed price.
    pub fn list_with_prices(&self) -> Vec<IngredientRecord> {
        debug!(count = self.records.len(), "Computing ingredient prices");
        self.records.iter().map(IngredientRecord::priced).collect()
    }

    /// Sum of all computed prices; zero when empty.
    pub fn total(&self) -> Amount {
        compute_total(&self.records)
    }

    /// Stored records, with placeholder prices.
    pub fn records(&self) -> &[IngredientRecord] {
        &self.records
    }

    /// Distinct ingredient names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.name.as_str()) {
                names.push(&record.name);
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
